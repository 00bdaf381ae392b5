use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

use super::RelayoutUpdate;

/// Version tag for the relayout-update interchange payload. Bump when the
/// serialized shape changes incompatibly.
pub const RELAYOUT_UPDATE_JSON_SCHEMA_V1: u32 = 1;

/// Versioned envelope for handing a [`RelayoutUpdate`] across a process or
/// language boundary, e.g. to the browser bridge that applies it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelayoutUpdateJsonContractV1 {
    pub schema_version: u32,
    pub update: RelayoutUpdate,
}

impl RelayoutUpdate {
    pub fn to_json_contract_v1_pretty(&self) -> EngineResult<String> {
        let payload = RelayoutUpdateJsonContractV1 {
            schema_version: RELAYOUT_UPDATE_JSON_SCHEMA_V1,
            update: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|error| {
            EngineError::InvalidData(format!(
                "failed to serialize relayout update contract v1: {error}"
            ))
        })
    }

    /// Accepts either a bare update or the versioned v1 envelope.
    pub fn from_json_compat_str(input: &str) -> EngineResult<Self> {
        if let Ok(update) = serde_json::from_str::<Self>(input) {
            return Ok(update);
        }

        let payload: RelayoutUpdateJsonContractV1 =
            serde_json::from_str(input).map_err(|error| {
                EngineError::InvalidData(format!(
                    "failed to parse relayout update payload: {error}"
                ))
            })?;
        if payload.schema_version != RELAYOUT_UPDATE_JSON_SCHEMA_V1 {
            return Err(EngineError::InvalidData(format!(
                "unsupported relayout update schema version: {}",
                payload.schema_version
            )));
        }
        Ok(payload.update)
    }
}
