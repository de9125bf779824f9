//! Pagination loops shared by the list endpoints.
//!
//! The data-management endpoints paginate with a `links.next.href` cursor
//! carrying a `page[number]` query parameter; the admin/HQ endpoints have
//! no cursor at all and are walked by comparing page size against the
//! requested `limit`. The count-based walk is knowingly inexact: a result
//! set whose final page holds exactly `limit` items triggers one extra
//! request that comes back empty, and a server with more data after such a
//! page would be cut short. Callers get the original upstream behavior,
//! not a speculative fix.

use std::future::Future;

use serde_json::Value;
use url::Url;

use crate::client::{ForgeClient, RequestOptions};
use crate::error::Result;
use crate::models::{JsonApiPage, ResourceObject};

/// Safety limit on pages fetched by one list call.
const MAX_PAGES: u32 = 1000;

/// Extract the next page number from a page's `links.next.href`.
///
/// The href embeds the cursor as a `page[number]=<digits>` query parameter
/// (`page%5Bnumber%5D` on the wire). An absent link, an unparseable href
/// or a non-numeric value all mean the sequence is done.
pub(crate) fn next_page_number(page: &JsonApiPage) -> Option<u32> {
    let href = page.links.next.as_ref()?.href.as_deref()?;
    let url = Url::parse(href).ok()?;
    url.query_pairs()
        .find(|(key, _)| key == "page[number]")
        .and_then(|(_, value)| value.parse().ok())
}

/// Follow the `links.next` cursor, accumulating `data` and `included`
/// across all pages in page order.
pub(crate) async fn collect_link_pages(
    client: &ForgeClient,
    endpoint: &str,
    base_query: Vec<(String, String)>,
) -> Result<(Vec<ResourceObject>, Vec<ResourceObject>)> {
    let mut data = Vec::new();
    let mut included = Vec::new();
    let mut next_page: Option<u32> = None;
    let mut fetched = 0u32;

    loop {
        let mut opts = RequestOptions::new().queries(base_query.clone());
        if let Some(number) = next_page {
            opts = opts.query("page[number]", number.to_string());
        }

        let payload = client.get_json(endpoint, opts).await?;
        let page: JsonApiPage = serde_json::from_value(payload)?;

        next_page = next_page_number(&page);
        data.extend(page.data);
        included.extend(page.included);

        if next_page.is_none() {
            return Ok((data, included));
        }

        fetched += 1;
        if fetched >= MAX_PAGES {
            tracing::warn!("reached pagination limit of {MAX_PAGES} pages at {endpoint}, stopping");
            return Ok((data, included));
        }
    }
}

/// Walk an offset-paginated endpoint by page size.
///
/// `fetch(limit, offset)` returns one page of items. A page of exactly
/// `limit` items triggers a follow-up at `offset + limit`; anything
/// shorter ends the walk.
pub(crate) async fn collect_offset_pages<F, Fut>(
    limit: usize,
    start_offset: usize,
    mut fetch: F,
) -> Result<Vec<Value>>
where
    F: FnMut(usize, usize) -> Fut,
    Fut: Future<Output = Result<Vec<Value>>>,
{
    let mut items = Vec::new();
    let mut offset = start_offset;
    let mut fetched = 0u32;

    loop {
        let page = fetch(limit, offset).await?;
        let page_len = page.len();
        items.extend(page);

        if page_len != limit {
            return Ok(items);
        }
        offset += limit;

        fetched += 1;
        if fetched >= MAX_PAGES {
            tracing::warn!("reached pagination limit of {MAX_PAGES} pages, stopping");
            return Ok(items);
        }
    }
}
