//! Shared helpers for list view tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use portal_core::error::ProtocolError;
use portal_core::{CatalogSource, Character, PageCursor, PageResult, Result};
use portal_view::{ListSnapshot, ListView};
use serde_json::json;
use tokio::sync::Semaphore;

pub const PAGE_2: &str = "https://rickandmortyapi.com/api/character?page=2";
pub const PAGE_3: &str = "https://rickandmortyapi.com/api/character?page=3";

/// A request as seen by the source.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Call {
    pub query: Option<String>,
    pub cursor: Option<String>,
}

impl Call {
    pub fn first(query: Option<&str>) -> Self {
        Self {
            query: query.map(str::to_string),
            cursor: None,
        }
    }

    pub fn page(cursor: &str) -> Self {
        Self {
            query: None,
            cursor: Some(cursor.to_string()),
        }
    }
}

#[derive(Debug, Clone)]
enum Reply {
    Page(PageResult),
    Status(u16),
}

/// A scripted catalog that records every request.
///
/// Requests for a held call wait until [`FakeSource::release`] is called.
#[derive(Debug, Default)]
pub struct FakeSource {
    replies: Mutex<HashMap<Call, Reply>>,
    gates: Mutex<HashMap<Call, Arc<Semaphore>>>,
    calls: Mutex<Vec<Call>>,
}

impl FakeSource {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn reply(&self, call: Call, page: PageResult) {
        self.replies.lock().unwrap().insert(call, Reply::Page(page));
    }

    pub fn fail(&self, call: Call, status: u16) {
        self.replies.lock().unwrap().insert(call, Reply::Status(status));
    }

    pub fn hold(&self, call: Call) {
        self.gates
            .lock()
            .unwrap()
            .insert(call, Arc::new(Semaphore::new(0)));
    }

    pub fn release(&self, call: &Call) {
        if let Some(gate) = self.gates.lock().unwrap().get(call) {
            gate.add_permits(1);
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl CatalogSource for FakeSource {
    async fn fetch_page(
        &self,
        query: Option<&str>,
        cursor: Option<&PageCursor>,
    ) -> Result<PageResult> {
        let call = match cursor {
            Some(cursor) => Call::page(cursor.as_str()),
            None => Call::first(query),
        };
        self.calls.lock().unwrap().push(call.clone());

        let gate = self.gates.lock().unwrap().get(&call).cloned();
        if let Some(gate) = gate {
            let _permit = gate.acquire().await.unwrap();
        }

        let reply = self.replies.lock().unwrap().get(&call).cloned();
        match reply {
            Some(Reply::Page(page)) => Ok(page),
            Some(Reply::Status(status)) => Err(ProtocolError::new(status, None).into()),
            None => Err(ProtocolError::new(599, Some(format!("unscripted {call:?}"))).into()),
        }
    }
}

pub fn character(id: u64) -> Character {
    serde_json::from_value(json!({
        "id": id,
        "name": format!("Character {id}"),
        "status": if id % 3 == 0 { "Dead" } else { "Alive" },
        "species": "Human",
        "type": "",
        "gender": "Male",
        "origin": { "name": "Earth (C-137)", "url": "" },
        "location": { "name": "Citadel of Ricks", "url": "" },
        "image": format!("https://rickandmortyapi.com/api/character/avatar/{id}.jpeg"),
        "episode": ["https://rickandmortyapi.com/api/episode/1"],
        "url": format!("https://rickandmortyapi.com/api/character/{id}")
    }))
    .unwrap()
}

pub fn page(ids: impl IntoIterator<Item = u64>, next: Option<&str>) -> PageResult {
    PageResult {
        items: ids.into_iter().map(character).collect(),
        next: next.map(|n| PageCursor::new(n).unwrap()),
        count: None,
        pages: None,
    }
}

pub fn ids(snapshot: &ListSnapshot) -> Vec<u64> {
    snapshot.items.iter().map(|c| c.id.0).collect()
}

/// Wait for a snapshot matching `predicate`, failing the test if it never
/// shows up.
pub async fn settle<F>(view: &ListView, predicate: F) -> ListSnapshot
where
    F: FnMut(&ListSnapshot) -> bool,
{
    tokio::time::timeout(Duration::from_secs(30), view.wait_until(predicate))
        .await
        .expect("timed out waiting for list state")
        .expect("list view stopped publishing")
}
