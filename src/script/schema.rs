//! JSON Schema of the wire contract.
//!
//! Generated from the serde types, so renames and optional fields match what
//! the compiler actually reads and writes.

use schemars::schema::RootSchema;
use schemars::schema_for;

use crate::error::MoviolaResult;
use super::model::{CompilerInput, EditScriptMaster};

/// Schema of the compiled `EditScriptMaster`.
pub fn master_script_schema() -> RootSchema {
    schema_for!(EditScriptMaster)
}

/// Schema of the `CompilerInput` request.
pub fn compiler_input_schema() -> RootSchema {
    schema_for!(CompilerInput)
}

/// Pretty JSON of [`master_script_schema`].
pub fn master_script_schema_json() -> MoviolaResult<String> {
    Ok(serde_json::to_string_pretty(&master_script_schema())?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn to_value(schema: RootSchema) -> Value {
        serde_json::to_value(schema).unwrap()
    }

    fn required(schema: &Value) -> Vec<&str> {
        schema["required"]
            .as_array()
            .map(|a| a.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }

    #[test]
    fn test_master_script_top_level() {
        let schema = to_value(master_script_schema());
        assert_eq!(schema["title"], "EditScriptMaster");
        let req = required(&schema);
        for field in ["meta", "rules", "timeline", "enginePackets"] {
            assert!(req.contains(&field), "{} not required", field);
        }
    }

    #[test]
    fn test_master_script_wire_names() {
        let schema = to_value(master_script_schema());
        let defs = &schema["definitions"];

        let timecode = &defs["Timecode"]["properties"];
        assert!(timecode.get("in").is_some());
        assert!(timecode.get("out").is_some());
        assert!(timecode.get("durationSec").is_some());

        assert!(defs["ScriptMeta"]["properties"].get("inputSnapshotHash").is_some());
        assert!(defs["TimelineClip"]["properties"].get("genPromptBase").is_some());

        let status = defs["PacketStatus"].to_string();
        for name in ["READY", "WARNING", "UNSUPPORTED", "UNKNOWN"] {
            assert!(status.contains(name), "{} missing", name);
        }
        assert!(defs["AspectRatio"].to_string().contains("\"16:9\""));
    }

    #[test]
    fn test_optional_fields_not_required() {
        let schema = to_value(master_script_schema());
        let notes = &schema["definitions"]["CompatibilityNotes"];
        assert!(required(notes).is_empty());
        let packet = &schema["definitions"]["EnginePacket"];
        assert!(!required(packet).contains(&"compatibilityNotes"));
    }

    #[test]
    fn test_compiler_input_requires_identity_only() {
        let schema = to_value(compiler_input_schema());
        let req = required(&schema);
        assert!(req.contains(&"traceId"));
        assert!(req.contains(&"createdAt"));
        assert!(!req.contains(&"narrativeText"));
        assert!(!req.contains(&"moviola"));
    }

    #[test]
    fn test_schema_json_is_pretty() {
        let json = master_script_schema_json().unwrap();
        assert!(json.starts_with("{\n"));
        assert!(json.contains("\"enginePackets\""));
    }
}
