// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Column reinforcement command.

use addin_lite_geometry::extract_cross_section;

use crate::column::{split_vertical_count, ColumnLayout};
use crate::constants::ColumnRebarConstants;
use crate::error::Result;
use crate::hook::stirrup_hook_orientation;
use crate::host::{
    ElementId, Hook, OptionsProvider, RebarFactory, RebarId, RebarRequest, RebarStyle,
    StructuralElement, StructuralKind,
};
use crate::layout::{TransverseLocation, VerticalSide};
use crate::maker::{place, Catalog, FramReinMaker};
use crate::options::ColumnRebarOptions;

/// Places ties and vertical bars in a column.
pub struct ColumnFramReinMaker {
    host: ElementId,
    layout: ColumnLayout,
}

impl ColumnFramReinMaker {
    pub fn new(element: &dyn StructuralElement, constants: ColumnRebarConstants) -> Result<Self> {
        let solid = element.solid()?;
        let driving = element.driving_curve()?;
        let section = extract_cross_section(&solid, &driving)?;
        let layout = ColumnLayout::new(element.kind(), section, constants)?;
        Ok(Self {
            host: element.id(),
            layout,
        })
    }

    pub fn layout(&self) -> &ColumnLayout {
        &self.layout
    }
}

impl FramReinMaker for ColumnFramReinMaker {
    type Options = ColumnRebarOptions;

    fn kind(&self) -> StructuralKind {
        StructuralKind::Column
    }

    fn display_options(
        &mut self,
        catalog: &Catalog,
        provider: &mut dyn OptionsProvider,
    ) -> Option<ColumnRebarOptions> {
        provider.column_options(catalog.bar_types(), catalog.hook_types())
    }

    fn validate(&self, options: &ColumnRebarOptions, catalog: &Catalog) -> Result<()> {
        options.validate()?;
        for name in options.bar_types() {
            catalog.bar_type(name)?;
        }
        for name in options.hook_types() {
            catalog.hook_type(name)?;
        }
        Ok(())
    }

    fn fill_with_bars(
        &self,
        options: &ColumnRebarOptions,
        factory: &mut dyn RebarFactory,
    ) -> Result<Vec<RebarId>> {
        let mut created = Vec::with_capacity(7);

        for location in TransverseLocation::ALL {
            let spacing = match location {
                TransverseLocation::Center => options.transverse_center_spacing,
                _ => options.transverse_end_spacing,
            };
            let geometry = self.layout.transverse_rebar(location, spacing)?;
            let hook = Hook {
                hook_type: options.transverse_hook_type.clone(),
                orientation: stirrup_hook_orientation(&geometry)?,
            };
            created.push(place(
                factory,
                RebarRequest {
                    host: self.host,
                    style: RebarStyle::StirrupTie,
                    bar_type: options.transverse_bar_type.clone(),
                    start_hook: Some(hook.clone()),
                    end_hook: Some(hook),
                    geometry,
                },
            )?);
        }

        let counts = split_vertical_count(options.vertical_bar_count)?;
        tracing::debug!(
            east = counts.east,
            north = counts.north,
            west = counts.west,
            south = counts.south,
            "Split vertical bars"
        );
        for side in VerticalSide::ALL {
            let geometry = self.layout.vertical_rebar(side, counts.get(side))?;
            created.push(place(
                factory,
                RebarRequest {
                    host: self.host,
                    style: RebarStyle::Standard,
                    bar_type: options.vertical_bar_type.clone(),
                    start_hook: None,
                    end_hook: None,
                    geometry,
                },
            )?);
        }

        Ok(created)
    }
}
