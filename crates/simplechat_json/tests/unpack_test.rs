use simplechat_core::VarValue;
use simplechat_json::PromptParams;

#[test]
fn missing_fields_use_defaults() -> anyhow::Result<()> {
    let (params, object) = PromptParams::unpack("```json\n{\"positive\": \"a cat\"}\n```", true)?;

    assert_eq!(params.positive(), "a cat");
    assert_eq!(params.negative(), "");
    assert_eq!(*params.width(), 1024);
    assert_eq!(*params.height(), 1024);
    assert_eq!(*params.steps(), 40);
    assert_eq!(*params.cfg(), 4.5);
    assert_eq!(params.sampler(), "er_sde");
    assert_eq!(*params.seed(), -1);
    assert_eq!(object.len(), 1);
    Ok(())
}

#[test]
fn lenient_number_coercion() -> anyhow::Result<()> {
    let (params, _) = PromptParams::unpack(
        r#"{"width": "832", "height": 1215.5, "steps": "30.9", "cfg": "5", "seed": true, "sampler": "Euler_A",}"#,
        false,
    )?;

    assert_eq!(*params.width(), 832);
    assert_eq!(*params.height(), 1216);
    assert_eq!(*params.steps(), 30);
    assert_eq!(*params.cfg(), 5.0);
    assert_eq!(*params.seed(), 1);
    assert_eq!(params.sampler(), "euler_ancestral");
    Ok(())
}

#[test]
fn unusable_values_fall_back() -> anyhow::Result<()> {
    let (params, _) =
        PromptParams::unpack(r#"{"width": "wide", "cfg": [1], "notes": {"k": 1}}"#, false)?;
    assert_eq!(*params.width(), 1024);
    assert_eq!(*params.cfg(), 4.5);
    assert_eq!(params.notes(), "{\"k\":1}");
    Ok(())
}

#[test]
fn vars_include_prefixed_and_localized_names() -> anyhow::Result<()> {
    let (params, _) = PromptParams::unpack(r#"{"positive": "p", "steps": 12}"#, true)?;
    let vars = params.vars();

    assert_eq!(vars.get("positive"), Some(&VarValue::from("p")));
    assert_eq!(vars.get("anima.steps"), Some(&VarValue::Int(12)));
    assert_eq!(vars.get("sampler_name"), Some(&VarValue::from("er_sde")));
    assert_eq!(vars.get("正面提示词"), Some(&VarValue::from("p")));
    assert_eq!(vars.get("anima.步数"), Some(&VarValue::Int(12)));
    Ok(())
}

#[test]
fn array_top_level_rejected() {
    assert!(PromptParams::unpack("[1, 2]", true).is_err());
}
