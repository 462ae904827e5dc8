// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Placement orchestrator shared by the beam and column commands.
//!
//! A reinforcement command walks a fixed sequence of stages:
//!
//! ```text
//! CollectRebarTypes -> DisplayOptions -> FillWithBars -> Done
//! ```
//!
//! A stage that cannot continue short-circuits the rest and the command
//! reports a [`PlacementOutcome`]. Layout and host errors abort the whole
//! command through [`Error`](crate::Error).

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::beam_maker::BeamFramReinMaker;
use crate::column_maker::ColumnFramReinMaker;
use crate::constants::ReinforcementConstants;
use crate::error::{Error, Result};
use crate::host::{
    HostContext, OptionsProvider, RebarBarType, RebarCatalog, RebarFactory, RebarHookType,
    RebarId, RebarRequest, StructuralElement, StructuralKind,
};

/// Stage of a reinforcement command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    CollectRebarTypes,
    DisplayOptions,
    FillWithBars,
    Done,
}

/// How a reinforcement command ended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PlacementOutcome {
    /// Every bar group was placed; ids are in placement order.
    Done { created: Vec<RebarId> },
    /// The user dismissed the options step.
    Cancelled,
    /// A stage could not run.
    Failed { stage: Stage, reason: String },
}

/// Bar and hook types available in the document, indexed by name.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    bar_types: Vec<RebarBarType>,
    hook_types: Vec<RebarHookType>,
    bar_index: FxHashMap<String, usize>,
    hook_index: FxHashMap<String, usize>,
}

impl Catalog {
    pub fn collect(source: &dyn RebarCatalog) -> Self {
        let bar_types = source.bar_types();
        let hook_types = source.hook_types();

        let mut bar_index = FxHashMap::default();
        for (i, bar) in bar_types.iter().enumerate() {
            bar_index.entry(bar.name.clone()).or_insert(i);
        }
        let mut hook_index = FxHashMap::default();
        for (i, hook) in hook_types.iter().enumerate() {
            hook_index.entry(hook.name.clone()).or_insert(i);
        }

        Self {
            bar_types,
            hook_types,
            bar_index,
            hook_index,
        }
    }

    pub fn bar_types(&self) -> &[RebarBarType] {
        &self.bar_types
    }

    pub fn hook_types(&self) -> &[RebarHookType] {
        &self.hook_types
    }

    pub fn bar_type(&self, name: &str) -> Result<&RebarBarType> {
        self.bar_index
            .get(name)
            .map(|&i| &self.bar_types[i])
            .ok_or_else(|| Error::UnknownBarType(name.to_string()))
    }

    pub fn hook_type(&self, name: &str) -> Result<&RebarHookType> {
        self.hook_index
            .get(name)
            .map(|&i| &self.hook_types[i])
            .ok_or_else(|| Error::UnknownHookType(name.to_string()))
    }

    /// Reason the catalog can't support a command, if any.
    fn missing(&self) -> Option<&'static str> {
        if self.bar_types.is_empty() {
            Some("no rebar bar types are loaded in the document")
        } else if self.hook_types.is_empty() {
            Some("no rebar hook types are loaded in the document")
        } else {
            None
        }
    }
}

/// A reinforcement command for one framing kind.
///
/// Implementors supply the options and fill steps; [`run`](Self::run) drives
/// the stages.
pub trait FramReinMaker {
    type Options;

    /// Kind of element this maker reinforces, for logging.
    fn kind(&self) -> StructuralKind;

    /// Ask the user for options. `None` means the dialog was cancelled.
    fn display_options(
        &mut self,
        catalog: &Catalog,
        provider: &mut dyn OptionsProvider,
    ) -> Option<Self::Options>;

    /// Check the options against themselves and the catalog.
    fn validate(&self, options: &Self::Options, catalog: &Catalog) -> Result<()>;

    /// Place every bar group, returning created ids in placement order.
    fn fill_with_bars(
        &self,
        options: &Self::Options,
        factory: &mut dyn RebarFactory,
    ) -> Result<Vec<RebarId>>;

    fn run(&mut self, ctx: &mut HostContext<'_>) -> Result<PlacementOutcome> {
        let kind = self.kind();

        tracing::debug!(?kind, stage = ?Stage::CollectRebarTypes, "Entering stage");
        let catalog = Catalog::collect(ctx.catalog);
        if let Some(reason) = catalog.missing() {
            tracing::warn!(?kind, reason, "Reinforcement stopped");
            return Ok(PlacementOutcome::Failed {
                stage: Stage::CollectRebarTypes,
                reason: reason.to_string(),
            });
        }

        tracing::debug!(
            ?kind,
            stage = ?Stage::DisplayOptions,
            bar_types = catalog.bar_types().len(),
            hook_types = catalog.hook_types().len(),
            "Entering stage"
        );
        let options = match self.display_options(&catalog, &mut *ctx.options) {
            Some(options) => options,
            None => {
                tracing::info!(?kind, "Reinforcement cancelled");
                return Ok(PlacementOutcome::Cancelled);
            }
        };
        self.validate(&options, &catalog)?;

        tracing::debug!(?kind, stage = ?Stage::FillWithBars, "Entering stage");
        let created = self.fill_with_bars(&options, &mut *ctx.factory)?;

        tracing::info!(?kind, count = created.len(), "Reinforcement placed");
        Ok(PlacementOutcome::Done { created })
    }
}

/// Create one rebar set through the host, which is fatal on rejection.
pub(crate) fn place(factory: &mut dyn RebarFactory, request: RebarRequest) -> Result<RebarId> {
    let id = factory.create_rebar(&request)?;
    tracing::debug!(
        rebar = id.0,
        bar_type = %request.bar_type,
        count = request.geometry.bar_count,
        spacing = request.geometry.spacing,
        "Placed rebar set"
    );
    Ok(id)
}

/// Reinforce a selected framing element with the maker for its kind.
pub fn make_reinforcement(
    element: &dyn StructuralElement,
    ctx: &mut HostContext<'_>,
    constants: &ReinforcementConstants,
) -> Result<PlacementOutcome> {
    tracing::info!(element = element.id(), kind = ?element.kind(), "Reinforcing element");
    match element.kind() {
        StructuralKind::Beam => BeamFramReinMaker::new(element, constants.beam.clone())?.run(ctx),
        StructuralKind::Column => {
            ColumnFramReinMaker::new(element, constants.column.clone())?.run(ctx)
        }
        other => Err(Error::NotFraming(element.id(), other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(Vec<RebarBarType>, Vec<RebarHookType>);

    impl RebarCatalog for Fixed {
        fn bar_types(&self) -> Vec<RebarBarType> {
            self.0.clone()
        }

        fn hook_types(&self) -> Vec<RebarHookType> {
            self.1.clone()
        }
    }

    fn bar(name: &str, diameter: f64) -> RebarBarType {
        RebarBarType {
            name: name.into(),
            diameter,
        }
    }

    #[test]
    fn catalog_lookup_by_name() {
        let source = Fixed(
            vec![bar("#4", 0.042), bar("#8", 0.083)],
            vec![RebarHookType {
                name: "Standard - 90 deg.".into(),
                angle: 90.0,
            }],
        );
        let catalog = Catalog::collect(&source);
        assert_eq!(catalog.bar_type("#8").unwrap().diameter, 0.083);
        assert!(catalog.hook_type("Standard - 90 deg.").is_ok());
        assert!(matches!(
            catalog.bar_type("#11"),
            Err(Error::UnknownBarType(name)) if name == "#11"
        ));
        assert!(catalog.missing().is_none());
    }

    #[test]
    fn first_duplicate_name_wins() {
        let source = Fixed(vec![bar("#4", 0.042), bar("#4", 0.5)], Vec::new());
        let catalog = Catalog::collect(&source);
        assert_eq!(catalog.bar_type("#4").unwrap().diameter, 0.042);
        assert!(catalog.missing().is_some());
    }
}
