use anyhow::{Context, Result};
use serde_json::Value;

use crate::{CliTest, HERO, run};

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    let (output, stdout, _) = run(test.command().arg("init"))?;

    assert!(output.status.success());
    assert_eq!(stdout, "\u{2713} Created .parlairc.json\n");

    let content = test.read_file(".parlairc.json")?;
    let parsed: Value = serde_json::from_str(&content).context("Config should be valid JSON")?;
    for field in [
        "ignores",
        "localesDir",
        "primaryLocale",
        "translatableAttributes",
        "clientDirective",
    ] {
        assert!(parsed.get(field).is_some(), "Config should have '{}'", field);
    }

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".parlairc.json", "{}")?;

    let (output, _, stderr) = run(test.command().arg("init"))?;

    assert_eq!(output.status.code(), Some(2));
    assert_eq!(stderr, "Error: .parlairc.json already exists\n");
    assert_eq!(test.read_file(".parlairc.json")?, "{}");

    Ok(())
}

#[test]
fn test_init_config_is_immediately_usable() -> Result<()> {
    let test = CliTest::with_file("src/components/Hero.tsx", HERO)?;

    run(test.command().arg("init"))?;

    let (output, _, stderr) = run(&mut test.extract_command("src"))?;
    assert!(
        output.status.success(),
        "Extract should work with initialized config. stderr: {}",
        stderr
    );
    assert!(test.root().join("locales/en.json").is_file());

    Ok(())
}

#[test]
fn test_no_command_prints_help() -> Result<()> {
    let test = CliTest::new()?;

    let (output, stdout, _) = run(&mut test.command())?;

    assert!(output.status.success());
    assert!(stdout.contains("Usage: parlai"));

    Ok(())
}
