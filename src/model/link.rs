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
use std::{fmt, marker::PhantomData, sync::Arc};

use crate::collection::{collect_links, list_referenced, Collected};
use crate::model::resource::{get_object, IsResource};
use crate::model::ODataId;
use crate::{Client, RedfishError};

/// A reference to another resource, kept as its URI until someone asks for it.
/// An empty URI means the payload did not link anything.
pub struct Link<T> {
    uri: String,
    target: PhantomData<fn() -> T>,
}

impl<T> Link<T> {
    pub fn new(uri: impl Into<String>) -> Self {
        Link {
            uri: uri.into(),
            target: PhantomData,
        }
    }

    pub fn empty() -> Self {
        Link::new(String::new())
    }

    pub fn is_set(&self) -> bool {
        !self.uri.is_empty()
    }

    pub fn uri(&self) -> Option<&str> {
        if self.is_set() {
            Some(&self.uri)
        } else {
            None
        }
    }
}

impl<T: IsResource> Link<T> {
    /// Fetches the linked resource. Every call is a new GET.
    pub async fn get(&self, client: &Arc<dyn Client>) -> Result<Option<T>, RedfishError> {
        match self.uri() {
            None => Ok(None),
            Some(uri) => get_object(client, uri).await.map(Some),
        }
    }

    /// Fetches every member of the resource collection this link points at.
    pub async fn list(&self, client: &Arc<dyn Client>) -> Collected<T> {
        list_referenced(client, &self.uri).await
    }
}

impl<T> Default for Link<T> {
    fn default() -> Self {
        Link::empty()
    }
}

impl<T> Clone for Link<T> {
    fn clone(&self) -> Self {
        Link::new(self.uri.clone())
    }
}

impl<T> PartialEq for Link<T> {
    fn eq(&self, other: &Self) -> bool {
        self.uri == other.uri
    }
}

impl<T> fmt::Debug for Link<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Link").field(&self.uri).finish()
    }
}

impl<T> From<Option<ODataId>> for Link<T> {
    fn from(item: Option<ODataId>) -> Self {
        item.map(|x| Link::new(x.odata_id)).unwrap_or_default()
    }
}

impl<T> From<ODataId> for Link<T> {
    fn from(item: ODataId) -> Self {
        Link::new(item.odata_id)
    }
}

/// An array of links, e.g. `Links.Chassis`, with the `<Name>@odata.count` the
/// service declared next to it. The count can be larger than the number of links
/// when the service did not expand them all.
pub struct LinkCollection<T> {
    uris: Vec<String>,
    count: Option<usize>,
    target: PhantomData<fn() -> T>,
}

impl<T> LinkCollection<T> {
    pub fn new(uris: Vec<String>, count: Option<usize>) -> Self {
        LinkCollection {
            uris,
            count,
            target: PhantomData,
        }
    }

    pub fn uris(&self) -> &[String] {
        &self.uris
    }

    pub fn len(&self) -> usize {
        self.uris.len()
    }

    pub fn is_empty(&self) -> bool {
        self.uris.is_empty()
    }

    /// Declared count, falling back to the number of links we actually got.
    pub fn count(&self) -> usize {
        self.count.unwrap_or(self.uris.len())
    }
}

impl<T: IsResource> LinkCollection<T> {
    pub async fn get_all(&self, client: &Arc<dyn Client>) -> Collected<T> {
        collect_links(client, self.uris.clone()).await
    }
}

impl<T> Default for LinkCollection<T> {
    fn default() -> Self {
        LinkCollection::new(vec![], None)
    }
}

impl<T> Clone for LinkCollection<T> {
    fn clone(&self) -> Self {
        LinkCollection::new(self.uris.clone(), self.count)
    }
}

impl<T> fmt::Debug for LinkCollection<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LinkCollection")
            .field("uris", &self.uris)
            .field("count", &self.count)
            .finish()
    }
}

impl<T> From<Vec<ODataId>> for LinkCollection<T> {
    fn from(items: Vec<ODataId>) -> Self {
        LinkCollection::new(items.into_iter().map(|x| x.odata_id).collect(), None)
    }
}
