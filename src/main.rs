use azure_network_arm::config::EnvConfig;
use azure_network_arm::summary::{print_rows, resource_group_of, vnet_rows};
use azure_network_arm::{AzureIdentityCredential, ClientFactory, ClientOptions};
use log::LevelFilter;
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;
use std::error::Error;
use std::sync::Arc;

fn init_logging() {
    if log4rs::init_file("log4rs.yml", Default::default()).is_ok() {
        return;
    }
    let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new("{d(%H:%M:%S)} {h({l})} {t} - {m}{n}")))
        .build();
    let config = Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr)))
        .build(Root::builder().appender("stderr").build(LevelFilter::Warn));
    if let Ok(config) = config {
        let _ = log4rs::init_config(config);
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Do as little as possible in main.rs as it can't contain any tests
    init_logging();
    dotenv::dotenv().ok();
    log::info!("#Start main()");

    let env = EnvConfig::from_env()?;
    let credential = Arc::new(AzureIdentityCredential::from_environment());
    let options = ClientOptions::default()
        .with_cloud(env.cloud.clone())
        .with_application_id("azure-network-summary");
    let factory = ClientFactory::new(env.subscription_id.clone(), credential, Some(options))?;

    let vnets_client = factory.new_virtual_networks_client();
    let subnets_client = factory.new_subnets_client();
    let vnets = match env.resource_group.as_deref() {
        Some(rg) => vnets_client.list_pager(rg),
        None => vnets_client.list_all_pager(),
    }
    .collect_all()
    .await?;
    log::info!("# Got vnet count = {}", vnets.len());

    let mut rows = Vec::new();
    for vnet in &vnets {
        let (Some(id), Some(name)) = (vnet.id.as_deref(), vnet.name.as_deref()) else {
            log::warn!("skipping virtual network without id: {:?}", vnet.name);
            continue;
        };
        let Some(rg) = resource_group_of(id) else {
            log::warn!("no resource group in {id}");
            continue;
        };
        let subnets = subnets_client.list_pager(rg, name).collect_all().await?;
        rows.extend(vnet_rows(vnet, &subnets));
    }
    print_rows(&rows);

    Ok(())
}
