/* crates/trellis-engine/src/cms.rs */

//! CMS content brokering. The synchronous walk never blocks on content:
//! an unknown placement key is marked pending and surfaces as a request
//! the embedder resolves out-of-band; completion feeds the cache and the
//! embedder triggers a new pass. Completions for keys that went stale
//! (their slot unmounted before resolution) are discarded.

use std::collections::{HashMap, HashSet};

use crate::errors::RenderIssue;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CmsState {
  /// Content arrived and is ready to render
  Resolved(String),
  /// Requested, not yet resolved
  Pending,
  /// Collaborator answered "no content" for this placement
  Missing,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CmsRequest {
  pub placement_key: String,
  pub store_id: Option<String>,
  pub epoch: u64,
}

#[derive(Debug, Default)]
pub struct CmsBroker {
  epoch: u64,
  resolved: HashMap<String, Option<String>>,
  // placement key -> epoch of the outstanding request
  pending: HashMap<String, u64>,
  requests: Vec<CmsRequest>,
  seen_this_pass: HashSet<String>,
}

impl CmsBroker {
  pub fn new() -> Self {
    Self::default()
  }

  /// Start a render pass: bump the epoch and reset the seen set.
  pub fn begin_pass(&mut self) {
    self.epoch += 1;
    self.seen_this_pass.clear();
  }

  /// Finish a render pass: outstanding requests whose placement was not
  /// consulted this pass belong to unmounted slots; forget them so their
  /// eventual completion is treated as stale.
  pub fn end_pass(&mut self) {
    self.pending.retain(|key, _| self.seen_this_pass.contains(key));
    self.requests.retain(|req| self.seen_this_pass.contains(&req.placement_key));
  }

  /// Consult the cache during the walk. First sight of an unresolved key
  /// records a request at the current epoch.
  pub fn state(&mut self, placement_key: &str, store_id: Option<&str>) -> CmsState {
    self.seen_this_pass.insert(placement_key.to_string());
    if let Some(entry) = self.resolved.get(placement_key) {
      return match entry {
        Some(content) => CmsState::Resolved(content.clone()),
        None => CmsState::Missing,
      };
    }
    if !self.pending.contains_key(placement_key) {
      self.pending.insert(placement_key.to_string(), self.epoch);
      self.requests.push(CmsRequest {
        placement_key: placement_key.to_string(),
        store_id: store_id.map(str::to_string),
        epoch: self.epoch,
      });
    }
    CmsState::Pending
  }

  /// Requests recorded since the last drain, for the embedder to resolve.
  pub fn take_requests(&mut self) -> Vec<CmsRequest> {
    std::mem::take(&mut self.requests)
  }

  /// Apply an out-of-band completion. `content: None` records "no content
  /// exists". Returns the stale-result issue instead of applying when the
  /// request is no longer outstanding.
  pub fn complete(
    &mut self,
    placement_key: &str,
    epoch: u64,
    content: Option<String>,
  ) -> Result<(), RenderIssue> {
    match self.pending.get(placement_key) {
      Some(&outstanding) if outstanding == epoch => {
        self.pending.remove(placement_key);
        self.resolved.insert(placement_key.to_string(), content);
        Ok(())
      }
      _ => {
        tracing::debug!(placement_key, epoch, "stale cms completion discarded");
        Err(RenderIssue::StaleAsyncResult { placement_key: placement_key.to_string() })
      }
    }
  }

  /// Drop cached content, forcing a re-request on the next pass.
  pub fn invalidate(&mut self, placement_key: &str) {
    self.resolved.remove(placement_key);
    self.pending.remove(placement_key);
  }
}
