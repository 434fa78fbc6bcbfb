//! テスト用のモンスターDB
//!
//! 呼び出し回数を数える偽の `MonsterLookup`。

#![allow(dead_code)]

use async_trait::async_trait;
use monster_compo::resolver::{LookupFailure, LookupOutcome, MonsterLookup};
use monster_compo_common::Candidate;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

pub const STATIC_BASE: &str = "https://swarfarm.com/static/herders";

pub fn candidate(name: &str, level: i32) -> Candidate {
    Candidate {
        name: name.to_string(),
        image_filename: Some(format!(
            "{}_{}.png",
            name.to_lowercase().replace(' ', "_"),
            level
        )),
        element: Some("Wind".to_string()),
        archetype: Some("Attack".to_string()),
        awaken_level: Some(level),
    }
}

#[derive(Default)]
pub struct FakeLookup {
    /// 小文字の検索名 → 候補
    monsters: HashMap<String, Vec<Candidate>>,
    /// 失敗させる検索名（小文字）と残り回数
    failures: Mutex<HashMap<String, usize>>,
    calls: Mutex<Vec<String>>,
    call_count: AtomicUsize,
    delay: Option<Duration>,
    seen_limits: Mutex<HashSet<usize>>,
}

impl FakeLookup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, query: &str, candidates: Vec<Candidate>) -> Self {
        self.monsters.insert(query.to_lowercase(), candidates);
        self
    }

    /// 指定回数だけ失敗させる
    pub fn failing(self, query: &str, times: usize) -> Self {
        self.failures
            .lock()
            .unwrap()
            .insert(query.to_lowercase(), times);
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn seen_limits(&self) -> HashSet<usize> {
        self.seen_limits.lock().unwrap().clone()
    }
}

#[async_trait]
impl MonsterLookup for FakeLookup {
    async fn lookup(&self, query_name: &str, limit: usize) -> LookupOutcome {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        self.calls.lock().unwrap().push(query_name.to_string());
        self.seen_limits.lock().unwrap().insert(limit);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let key = query_name.to_lowercase();
        {
            let mut failures = self.failures.lock().unwrap();
            if let Some(remaining) = failures.get_mut(&key) {
                if *remaining > 0 {
                    *remaining -= 1;
                    return LookupOutcome::Failed(LookupFailure::Status(503));
                }
            }
        }

        let candidates = self.monsters.get(&key).cloned().unwrap_or_default();
        LookupOutcome::from_candidates(candidates.into_iter().take(limit).collect())
    }
}
