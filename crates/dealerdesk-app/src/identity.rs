// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Result, bail};
use std::sync::OnceLock;
use tracing::debug;

use crate::DealerId;

/// Answers "which dealer is acting" once per session.
pub trait IdentityResolver {
    fn dealer_id(&self) -> Result<DealerId>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticIdentity {
    dealer_id: DealerId,
}

impl StaticIdentity {
    pub fn new(dealer_id: impl Into<DealerId>) -> Self {
        Self {
            dealer_id: dealer_id.into(),
        }
    }
}

impl IdentityResolver for StaticIdentity {
    fn dealer_id(&self) -> Result<DealerId> {
        if self.dealer_id.is_blank() {
            bail!("dealer id is empty -- sign in as a dealer and retry");
        }
        Ok(self.dealer_id.clone())
    }
}

/// Resolves through `inner` on first use and keeps the answer for the rest
/// of the session. Failures are not cached.
#[derive(Debug)]
pub struct SessionIdentity<R> {
    inner: R,
    resolved: OnceLock<DealerId>,
}

impl<R: IdentityResolver> SessionIdentity<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            resolved: OnceLock::new(),
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.resolved.get().is_some()
    }
}

impl<R: IdentityResolver> IdentityResolver for SessionIdentity<R> {
    fn dealer_id(&self) -> Result<DealerId> {
        if let Some(id) = self.resolved.get() {
            return Ok(id.clone());
        }
        let id = self.inner.dealer_id()?;
        if id.is_blank() {
            bail!("identity resolver returned an empty dealer id");
        }
        debug!(dealer = %id, "resolved session identity");
        Ok(self.resolved.get_or_init(|| id).clone())
    }
}
