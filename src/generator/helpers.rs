//! Handlebars helpers available to artifact templates

use handlebars::{
    Context, Handlebars, Helper, HelperResult, Output, RenderContext, RenderError,
    RenderErrorReason,
};
use serde_json::Value;

/// Names of every registered helper, so placeholder scanning can skip them.
pub const HELPER_NAMES: [&str; 1] = ["env_or"];

/// Shell parameter expansion that prefers a runtime variable:
/// `{{env_or "PORT" port}}` renders `${PORT:-8501}`.
pub fn env_or_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _rc: &mut RenderContext,
    out: &mut dyn Output,
) -> HelperResult {
    let variable = h
        .param(0)
        .and_then(|v| v.value().as_str())
        .ok_or_else(|| {
            RenderError::from(RenderErrorReason::Other(
                "env_or helper requires a variable name".to_string(),
            ))
        })?;

    let fallback = h
        .param(1)
        .map(|v| match v.value() {
            Value::String(s) => s.clone(),
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Null => String::new(),
            other => other.to_string(),
        })
        .ok_or_else(|| {
            RenderError::from(RenderErrorReason::Other(
                "env_or helper requires a fallback value".to_string(),
            ))
        })?;

    out.write(&format!("${{{variable}:-{fallback}}}"))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_env_or_renders_shell_default() {
        let mut handlebars = Handlebars::new();
        handlebars.register_helper("env_or", Box::new(env_or_helper));
        let rendered = handlebars
            .render_template(r#"{{env_or "PORT" port}}"#, &json!({"port": "8501"}))
            .unwrap();
        assert_eq!(rendered, "${PORT:-8501}");
    }

    #[test]
    fn test_env_or_without_fallback_fails() {
        let mut handlebars = Handlebars::new();
        handlebars.register_helper("env_or", Box::new(env_or_helper));
        assert!(handlebars
            .render_template(r#"{{env_or "PORT"}}"#, &json!({}))
            .is_err());
    }
}
