// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, bail};
use dealerdesk_table::SelectionSet;
use serde::{Deserialize, Serialize};

use crate::{CascadeLevel, CascadeState, DealerId, IdentityResolver, ProductId};

/// Bulk request to stock the selected products under one variant path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DealerAssignmentInput {
    pub dealer_id: DealerId,
    pub variant_path: Vec<String>,
    pub product_ids: Vec<ProductId>,
    pub price_cents: Option<i64>,
}

impl DealerAssignmentInput {
    pub fn from_session(
        identity: &dyn IdentityResolver,
        cascade: &CascadeState,
        selection: &SelectionSet,
        price_cents: Option<i64>,
    ) -> Result<Self> {
        let dealer_id = identity
            .dealer_id()
            .context("resolve dealer for assignment")?;
        Ok(Self {
            dealer_id,
            variant_path: cascade.selected_path(),
            product_ids: selection.ids().map(ProductId::from).collect(),
            price_cents,
        })
    }

    pub fn validate(&self) -> Result<()> {
        if self.dealer_id.is_blank() {
            bail!("dealer is required -- sign in as a dealer and retry");
        }
        if self.product_ids.is_empty() {
            bail!("no products selected -- select at least one product and retry");
        }
        if let Some(level) = CascadeLevel::ALL.get(self.variant_path.len()) {
            bail!(
                "{} is required -- choose a {} and retry",
                level.label(),
                level.label()
            );
        }
        if self
            .variant_path
            .iter()
            .any(|segment| segment.trim().is_empty())
        {
            bail!("variant path contains an empty level -- reselect the variant and retry");
        }
        if let Some(price) = self.price_cents
            && price < 0
        {
            bail!("dealer price cannot be negative");
        }
        Ok(())
    }
}
