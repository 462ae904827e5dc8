// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Command entry points, one per host command.

use addin_lite_rebar::{
    make_reinforcement, BeamFramReinMaker, ColumnFramReinMaker, FramReinMaker, PlacementOutcome,
};
use addin_lite_routing::{Router, RouterConfig};
use anyhow::Result;
use serde::Serialize;

use crate::host::{Document, DuctRules, ElementCounts, HostCall, ScriptedHost};
use crate::scenario::{MemberScenario, RouteScenario};

/// Result reported back to the host, as its command interface expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "message", rename_all = "snake_case")]
pub enum CommandStatus {
    Succeeded,
    Cancelled,
    Failed(String),
}

/// Printed output of one command run.
#[derive(Debug, Serialize)]
pub struct Report {
    pub command: &'static str,
    #[serde(flatten)]
    pub status: CommandStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<serde_json::Value>,
    /// Elements left in the document after the command.
    pub elements: ElementCounts,
    pub calls: Vec<HostCall>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberCommand {
    /// Reinforce a beam; other kinds are refused.
    Beam,
    /// Reinforce a column; other kinds are refused.
    Column,
    /// Pick the maker from the element's kind.
    Reinforce,
}

impl MemberCommand {
    pub fn name(self) -> &'static str {
        match self {
            Self::Beam => "beam",
            Self::Column => "column",
            Self::Reinforce => "reinforce",
        }
    }
}

pub fn reinforce(command: MemberCommand, scenario: &MemberScenario) -> Result<Report> {
    let mut host = ScriptedHost::for_member(scenario);
    let element = &scenario.element;
    let constants = &scenario.constants;

    let result = {
        let mut ctx = host.context();
        match command {
            MemberCommand::Beam => BeamFramReinMaker::new(element, constants.beam.clone())
                .and_then(|mut maker| maker.run(&mut ctx)),
            MemberCommand::Column => ColumnFramReinMaker::new(element, constants.column.clone())
                .and_then(|mut maker| maker.run(&mut ctx)),
            MemberCommand::Reinforce => make_reinforcement(element, &mut ctx, constants),
        }
    };

    let (status, outcome) = match result {
        Ok(outcome @ PlacementOutcome::Done { .. }) => {
            (CommandStatus::Succeeded, Some(serde_json::to_value(&outcome)?))
        }
        Ok(PlacementOutcome::Cancelled) => (CommandStatus::Cancelled, None),
        Ok(PlacementOutcome::Failed { stage, reason }) => {
            (CommandStatus::Failed(format!("{stage:?}: {reason}")), None)
        }
        Err(e) => {
            tracing::error!(element = element.id, error = %e, "Reinforcement failed");
            (CommandStatus::Failed(e.to_string()), None)
        }
    };

    Ok(Report {
        command: command.name(),
        status,
        outcome,
        elements: host.document.counts(),
        calls: host.document.into_calls(),
    })
}

pub fn route(scenario: &RouteScenario) -> Result<Report> {
    let config = scenario.router.clone().unwrap_or_else(RouterConfig::from_env);
    let mut document = Document::for_route(&scenario.request, DuctRules::from(&config));

    let (status, outcome) = match Router::new(config).route(&scenario.request, &mut document) {
        Ok(outcome) => (CommandStatus::Succeeded, Some(serde_json::to_value(&outcome)?)),
        Err(e) => {
            tracing::error!(error = %e, "Routing failed");
            (CommandStatus::Failed(e.to_string()), None)
        }
    };

    Ok(Report {
        command: "route",
        status,
        outcome,
        elements: document.counts(),
        calls: document.into_calls(),
    })
}
