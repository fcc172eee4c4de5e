use crate::{
    envelope::Page,
    error::{self, Error, Result},
};
use axum::{
    extract::{FromRequestParts, OriginalUri, Query},
    http::{header::HOST, request::Parts},
};
use sea_orm::{ConnectionTrait, EntityTrait, FromQueryResult, PaginatorTrait, Select};
use std::collections::HashMap;

pub const DEFAULT_PAGE_SIZE: u64 = 10;
pub const MAX_PAGE_SIZE: u64 = 100;

/// `?page=&page_size=` of a collection request, plus what is needed to link
/// to the neighbouring pages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pagination {
    page: u64,
    page_size: u64,
    explicit_size: bool,
    base_url: String,
}

impl<S> FromRequestParts<S> for Pagination
where
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> std::result::Result<Self, Self::Rejection> {
        let Query(params) = Query::<HashMap<String, String>>::from_request_parts(parts, state)
            .await
            .map_err(|_| error::INVALID_PAGE)?;

        let host = parts
            .headers
            .get(HOST)
            .and_then(|host| host.to_str().ok())
            .unwrap_or("localhost");
        // nested routers only see the path below their prefix
        let path = match parts.extensions.get::<OriginalUri>() {
            Some(OriginalUri(uri)) => uri.path(),
            None => parts.uri.path(),
        };
        let base_url = format!("http://{host}{path}");

        Pagination::new(
            params.get("page").map(String::as_str),
            params.get("page_size").map(String::as_str),
            base_url,
        )
    }
}

impl Pagination {
    pub fn new(page: Option<&str>, page_size: Option<&str>, base_url: String) -> Result<Self> {
        let page = match page {
            None => 1,
            Some(page) => match page.trim().parse::<u64>() {
                Ok(page) if page >= 1 => page,
                _ => return Err(error::INVALID_PAGE),
            },
        };

        let size = page_size
            .and_then(|size| size.trim().parse::<u64>().ok())
            .filter(|size| *size > 0);

        Ok(Self {
            page,
            page_size: size.map_or(DEFAULT_PAGE_SIZE, |size| size.min(MAX_PAGE_SIZE)),
            explicit_size: size.is_some(),
            base_url,
        })
    }

    /// Fetches the requested page in ascending primary key order.
    pub async fn fetch<E, C>(&self, select: Select<E>, db: &C) -> Result<(u64, Vec<E::Model>)>
    where
        E: EntityTrait,
        E::Model: FromQueryResult + Send + Sync,
        C: ConnectionTrait,
    {
        let paginator = select.paginate(db, self.page_size);
        let count = paginator.num_items().await?;

        if !self.contains(count) {
            return Err(error::INVALID_PAGE);
        }

        let models = paginator.fetch_page(self.page - 1).await?;

        Ok((count, models))
    }

    pub fn page<T>(&self, count: u64, results: Vec<T>) -> Page<T> {
        let last = self.last_page(count);

        Page {
            count,
            next: (self.page < last).then(|| self.link(self.page + 1)),
            previous: (self.page > 1).then(|| self.link(self.page - 1)),
            results,
        }
    }

    fn last_page(&self, count: u64) -> u64 {
        count.div_ceil(self.page_size).max(1)
    }

    /// Page 1 always exists, even for an empty collection.
    fn contains(&self, count: u64) -> bool {
        self.page <= self.last_page(count)
    }

    fn link(&self, page: u64) -> String {
        let mut query = Vec::with_capacity(2);

        if page > 1 {
            query.push(format!("page={page}"));
        }

        // the size actually served, so following a link never changes it
        if self.explicit_size {
            query.push(format!("page_size={}", self.page_size));
        }

        if query.is_empty() {
            self.base_url.clone()
        } else {
            format!("{}?{}", self.base_url, query.join("&"))
        }
    }
}
