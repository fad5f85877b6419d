//! Capabilities command implementation

use olm_core::{AgentCapabilities, OlmAgent};

use crate::error::Result;

/// Run the capabilities command
pub fn run_capabilities(agent: &OlmAgent, json: bool) -> Result<()> {
    print!("{}", render_capabilities(&agent.capabilities(), json)?);
    Ok(())
}

fn render_capabilities(capabilities: &AgentCapabilities, json: bool) -> Result<String> {
    if json {
        let mut out = serde_json::to_string_pretty(capabilities)?;
        out.push('\n');
        Ok(out)
    } else {
        Ok(serde_yaml::to_string(capabilities)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_json() {
        let out = render_capabilities(&AgentCapabilities::for_addon("olm-addon"), true).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();

        assert_eq!(value["addonName"], "olm-addon");
        assert_eq!(value["installStrategy"]["type"], "installByLabel");
        assert_eq!(
            value["healthProber"]["deployments"][0]["name"],
            "olm-operator"
        );
    }

    #[test]
    fn test_render_yaml() {
        let out = render_capabilities(&AgentCapabilities::for_addon("olm-addon"), false).unwrap();
        assert!(out.starts_with("addonName: olm-addon\n"));
    }
}
