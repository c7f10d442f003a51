/*
 * SPDX-FileCopyrightText: Copyright (c) 2024 NVIDIA CORPORATION & AFFILIATES. All rights reserved.
 * SPDX-License-Identifier: MIT
 *
 * Permission is hereby granted, free of charge, to any person obtaining a
 * copy of this software and associated documentation files (the "Software"),
 * to deal in the Software without restriction, including without limitation
 * the rights to use, copy, modify, merge, publish, distribute, sublicense,
 * and/or sell copies of the Software, and to permit persons to whom the
 * Software is furnished to do so, subject to the following conditions:
 *
 * The above copyright notice and this permission notice shall be included in
 * all copies or substantial portions of the Software.
 *
 * THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
 * IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
 * FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL
 * THE AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
 * LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING
 * FROM, OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER
 * DEALINGS IN THE SOFTWARE.
 */

// Resolving many resources at once.
//
// A collection endpoint is walked page by page from one producer task. Each
// page's members are fetched by one task per member, and the producer waits
// for a page's members before following Members@odata.nextLink, so every
// member of page N is requested before any member of page N+1. Results come
// back over a channel to the caller's task, which is the only writer of the
// member list and of the CollectionError.

use std::{collections::HashSet, sync::Arc};

use tokio::{
    sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender},
    task::{JoinHandle, JoinSet},
};
use tracing::{debug, warn};

use crate::model::resource::{get_object, IsResource};
use crate::model::ODataId;
use crate::{jsonmap, Client, CollectionError, RedfishError};

/// What resolving several resources produced: the members that resolved, and
/// the failures keyed by URI. Both are always present; a non-empty `errors`
/// does not mean `members` is empty.
#[derive(Debug)]
pub struct Collected<T> {
    pub members: Vec<T>,
    pub errors: CollectionError,
}

impl<T> Default for Collected<T> {
    fn default() -> Self {
        Collected {
            members: vec![],
            errors: CollectionError::new(),
        }
    }
}

impl<T> Collected<T> {
    pub(crate) fn failed(uri: &str, err: RedfishError) -> Self {
        let mut collected = Collected::default();
        collected.errors.insert(uri.to_string(), err);
        collected
    }

    pub fn is_complete(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn into_parts(self) -> (Vec<T>, CollectionError) {
        (self.members, self.errors)
    }

    /// All-or-nothing view: any failure becomes `RedfishError::Collection` and
    /// the members that did resolve are dropped.
    pub fn into_result(self) -> Result<Vec<T>, RedfishError> {
        if self.errors.is_empty() {
            Ok(self.members)
        } else {
            Err(self.errors.into())
        }
    }
}

struct GetResult<T> {
    link: String,
    item: Result<T, RedfishError>,
}

struct Page {
    members: Vec<String>,
    next_link: Option<String>,
}

/// Resolves every member of the resource collection at `link`, following
/// `Members@odata.nextLink`. An empty link yields an empty result.
pub async fn list_referenced<T: IsResource>(client: &Arc<dyn Client>, link: &str) -> Collected<T> {
    if link.is_empty() {
        return Collected::default();
    }
    let (tx, rx) = unbounded_channel();
    let producer = tokio::spawn(walk_pages::<T>(client.clone(), link.to_string(), tx));
    drain(rx, producer).await
}

/// Resolves an already known list of member links.
pub async fn collect_links<T: IsResource>(
    client: &Arc<dyn Client>,
    links: Vec<String>,
) -> Collected<T> {
    if links.is_empty() {
        return Collected::default();
    }
    let (tx, rx) = unbounded_channel();
    let client = client.clone();
    let producer = tokio::spawn(async move { fetch_members::<T>(&client, links, &tx).await });
    drain(rx, producer).await
}

async fn drain<T>(
    mut rx: UnboundedReceiver<GetResult<T>>,
    producer: JoinHandle<()>,
) -> Collected<T> {
    let mut collected = Collected::default();
    while let Some(r) = rx.recv().await {
        match r.item {
            Ok(item) => collected.members.push(item),
            Err(e) => {
                debug!("collection member {} failed: {e}", r.link);
                collected.errors.insert(r.link, e);
            }
        }
    }
    // The channel only closes once the producer and all its workers dropped their senders.
    if let Err(e) = producer.await {
        warn!("collection producer task failed: {e}");
    }
    collected
}

async fn walk_pages<T: IsResource>(
    client: Arc<dyn Client>,
    first: String,
    tx: UnboundedSender<GetResult<T>>,
) {
    let mut visited = HashSet::new();
    let mut next = Some(first);
    while let Some(page_link) = next.take() {
        if !visited.insert(page_link.clone()) {
            warn!("collection page {page_link} links back to an earlier page, stopping");
            break;
        }
        match get_page(&client, &page_link).await {
            Ok(page) => {
                debug!(
                    "collection page {page_link}: {} member(s), next {:?}",
                    page.members.len(),
                    page.next_link
                );
                fetch_members::<T>(&client, page.members, &tx).await;
                next = page.next_link;
            }
            Err(e) => {
                // Receiver lives until every sender is gone, so this can't fail.
                let _ = tx.send(GetResult {
                    link: page_link,
                    item: Err(e),
                });
            }
        }
    }
}

// Fans out one task per link and returns once all of them have reported.
async fn fetch_members<T: IsResource>(
    client: &Arc<dyn Client>,
    links: Vec<String>,
    tx: &UnboundedSender<GetResult<T>>,
) {
    let mut workers = JoinSet::new();
    for link in links {
        let client = client.clone();
        let tx = tx.clone();
        workers.spawn(async move {
            let item = get_object::<T>(&client, &link).await;
            let _ = tx.send(GetResult { link, item });
        });
    }
    while let Some(joined) = workers.join_next().await {
        if let Err(e) = joined {
            warn!("collection member task failed: {e}");
        }
    }
}

async fn get_page(client: &Arc<dyn Client>, link: &str) -> Result<Page, RedfishError> {
    let (_status_code, body) = client.get(link).await?;
    let mut map: serde_json::Map<String, serde_json::Value> = serde_json::from_str(&body)
        .map_err(|e| RedfishError::JsonDeserializeError {
            url: link.to_string(),
            body: body.clone(),
            source: e,
        })?;
    let members: Vec<ODataId> = jsonmap::extract(&mut map, "Members", link)?;
    let next_link = jsonmap::extract_opt(&mut map, "Members@odata.nextLink", link)?;
    Ok(Page {
        members: members.into_iter().map(|m| m.odata_id).collect(),
        next_link,
    })
}
