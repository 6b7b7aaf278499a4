use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::{
    error::SolverResult,
    initialization::ShockTubeParameters,
    solver::{SolverParameters, SolverVariant},
};

/// Contents of the driver's JSON parameter file. Every section is optional.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(from = "ParamFile")]
pub struct SolverParamParser {
    pub variant: SolverVariant,
    /// Solver settings; a missing `target_cfl` falls back to the variant's default.
    pub solver: Option<SolverParameters>,
    pub shock_tube: ShockTubeParameters,
    pub output: String,
}
impl Default for SolverParamParser {
    fn default() -> Self {
        Self {
            variant: SolverVariant::ConservativeMacCormack,
            solver: None,
            shock_tube: ShockTubeParameters::default(),
            output: "outputs/shock_tube.csv".to_string(),
        }
    }
}
impl SolverParamParser {
    pub fn parse(file_path: impl AsRef<Path>) -> SolverResult<Self> {
        let file_content = fs::read_to_string(file_path)?;
        Self::parse_str(&file_content)
    }
    pub fn parse_str(content: &str) -> SolverResult<Self> {
        Ok(serde_json::from_str(content)?)
    }
    pub fn solver_params(&self) -> SolverParameters {
        self.solver
            .unwrap_or_else(|| SolverParameters::for_variant(self.variant))
    }
}

/// On-disk layout of the parameter file.
#[derive(Deserialize)]
struct ParamFile {
    #[serde(default = "default_variant")]
    variant: SolverVariant,
    #[serde(default)]
    solver: Option<SolverSection>,
    #[serde(default)]
    shock_tube: ShockTubeParameters,
    #[serde(default = "default_output")]
    output: String,
}

/// `target_cfl` is held apart so a missing value can take the variant's default.
#[derive(Deserialize)]
struct SolverSection {
    target_cfl: Option<f64>,
    #[serde(flatten)]
    rest: SolverParameters,
}

fn default_variant() -> SolverVariant {
    SolverParamParser::default().variant
}

fn default_output() -> String {
    SolverParamParser::default().output
}

impl From<ParamFile> for SolverParamParser {
    fn from(file: ParamFile) -> Self {
        let variant = file.variant;
        let solver = file.solver.map(|section| SolverParameters {
            target_cfl: section
                .target_cfl
                .unwrap_or_else(|| variant.default_target_cfl()),
            ..section.rest
        });
        Self {
            variant,
            solver,
            shock_tube: file.shock_tube,
            output: file.output,
        }
    }
}
