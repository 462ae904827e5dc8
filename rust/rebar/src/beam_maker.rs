// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Beam reinforcement command.

use addin_lite_geometry::{extract_cross_section, Vector3};

use crate::beam::BeamLayout;
use crate::constants::BeamRebarConstants;
use crate::error::Result;
use crate::hook::{hook_orientation, stirrup_hook_orientation};
use crate::host::{
    ElementId, Hook, OptionsProvider, RebarFactory, RebarId, RebarRequest, RebarStyle,
    StructuralElement, StructuralKind,
};
use crate::layout::{RebarGeometry, TopLocation, TransverseLocation};
use crate::maker::{place, Catalog, FramReinMaker};
use crate::options::BeamRebarOptions;

/// Places top, bottom and stirrup groups in a beam.
pub struct BeamFramReinMaker {
    host: ElementId,
    layout: BeamLayout,
}

impl BeamFramReinMaker {
    /// Extract the beam's profile and prepare its layout.
    pub fn new(element: &dyn StructuralElement, constants: BeamRebarConstants) -> Result<Self> {
        let solid = element.solid()?;
        let driving = element.driving_curve()?;
        let section = extract_cross_section(&solid, &driving)?;
        let layout = BeamLayout::new(element.kind(), section, constants)?;
        Ok(Self {
            host: element.id(),
            layout,
        })
    }

    pub fn layout(&self) -> &BeamLayout {
        &self.layout
    }

    /// Hook at the outer end of a top bar, bent down into the beam.
    fn top_hook(
        &self,
        geometry: &RebarGeometry,
        hook_type: &str,
        reversed: bool,
        down: &Vector3<f64>,
    ) -> Result<Hook> {
        let mut curve = geometry.curves[0].direction();
        if reversed {
            curve = -curve;
        }
        Ok(Hook {
            hook_type: hook_type.to_string(),
            orientation: hook_orientation(&curve, &geometry.normal, down)?,
        })
    }
}

impl FramReinMaker for BeamFramReinMaker {
    type Options = BeamRebarOptions;

    fn kind(&self) -> StructuralKind {
        StructuralKind::Beam
    }

    fn display_options(
        &mut self,
        catalog: &Catalog,
        provider: &mut dyn OptionsProvider,
    ) -> Option<BeamRebarOptions> {
        provider.beam_options(catalog.bar_types(), catalog.hook_types())
    }

    fn validate(&self, options: &BeamRebarOptions, catalog: &Catalog) -> Result<()> {
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
        options: &BeamRebarOptions,
        factory: &mut dyn RebarFactory,
    ) -> Result<Vec<RebarId>> {
        let mut created = Vec::with_capacity(7);
        let down = self.layout.section().down_direction()?;

        for location in TopLocation::ALL {
            let geometry = self.layout.top_rebar(location)?;
            let (bar_type, start_hook, end_hook) = match location {
                TopLocation::Start => (
                    &options.top_end_bar_type,
                    Some(self.top_hook(&geometry, &options.top_hook_type, false, &down)?),
                    None,
                ),
                TopLocation::Center => (&options.top_center_bar_type, None, None),
                TopLocation::End => (
                    &options.top_end_bar_type,
                    None,
                    Some(self.top_hook(&geometry, &options.top_hook_type, true, &down)?),
                ),
            };
            created.push(place(
                factory,
                RebarRequest {
                    host: self.host,
                    style: RebarStyle::Standard,
                    bar_type: bar_type.clone(),
                    start_hook,
                    end_hook,
                    geometry,
                },
            )?);
        }

        let geometry = self.layout.bottom_rebar()?;
        created.push(place(
            factory,
            RebarRequest {
                host: self.host,
                style: RebarStyle::Standard,
                bar_type: options.bottom_bar_type.clone(),
                start_hook: None,
                end_hook: None,
                geometry,
            },
        )?);

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

        Ok(created)
    }
}
