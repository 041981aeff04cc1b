//! Paged list operations that follow `nextLink`.

use super::pipeline::Pipeline;
use super::request::Request;
use crate::error::{Error, Result};
use crate::models::ListResult;
use futures::stream::{self, Stream};
use reqwest::Method;
use serde::de::DeserializeOwned;
use std::marker::PhantomData;
use std::sync::Arc;
use url::Url;

/// Iterates the pages of a list operation.
///
/// The first page comes from the operation's own request, later pages from
/// a `GET` on the previous page's `nextLink`. After an error the pager is
/// exhausted.
pub struct Pager<T> {
    pipeline: Arc<Pipeline>,
    first: Option<Result<Request>>,
    next_link: Option<String>,
    done: bool,
    _item: PhantomData<fn() -> T>,
}

impl<T> std::fmt::Debug for Pager<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pager")
            .field("next_link", &self.next_link)
            .field("done", &self.done)
            .finish_non_exhaustive()
    }
}

impl<T: DeserializeOwned> Pager<T> {
    /// `first` is the request for page one. An `Err` here is returned by
    /// the first `next_page` call, which keeps list constructors infallible.
    pub(crate) fn new(pipeline: Arc<Pipeline>, first: Result<Request>) -> Self {
        Pager {
            pipeline,
            first: Some(first),
            next_link: None,
            done: false,
            _item: PhantomData,
        }
    }

    /// True until the last page has been returned.
    pub fn more(&self) -> bool {
        !self.done
    }

    pub async fn next_page(&mut self) -> Result<ListResult<T>> {
        if self.done {
            return Err(Error::NoMorePages);
        }
        let result = self.fetch().await;
        if result.is_err() {
            self.done = true;
        }
        result
    }

    async fn fetch(&mut self) -> Result<ListResult<T>> {
        let request = match self.first.take() {
            Some(first) => first?,
            None => {
                let link = self.next_link.as_deref().ok_or(Error::NoMorePages)?;
                let mut req = Request::new(Method::GET, Url::parse(link)?);
                req.accept_json();
                req
            }
        };

        let rsp = self.pipeline.send(request).await?.expect_status(&[200])?;
        let page: ListResult<T> = rsp.json()?;

        match page.next_link.as_deref().filter(|l| !l.is_empty()) {
            Some(link) if self.next_link.as_deref() == Some(link) => {
                return Err(Error::Pager(format!("nextLink {link} was returned twice")));
            }
            Some(link) => {
                log::trace!("next page at {link}");
                self.next_link = Some(link.to_string());
            }
            None => {
                self.next_link = None;
                self.done = true;
            }
        }
        Ok(page)
    }

    /// Every page as a stream; ends after the last page or the first error.
    pub fn into_stream(self) -> impl Stream<Item = Result<ListResult<T>>> {
        stream::unfold(self, |mut pager| async move {
            if !pager.more() {
                return None;
            }
            let page = pager.next_page().await;
            Some((page, pager))
        })
    }

    /// Fetch all remaining pages and concatenate their items.
    pub async fn collect_all(mut self) -> Result<Vec<T>> {
        let mut items = Vec::new();
        while self.more() {
            items.extend(self.next_page().await?.value);
        }
        Ok(items)
    }
}
