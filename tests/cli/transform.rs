use anyhow::Result;
use pretty_assertions::assert_eq;

use crate::{CliTest, HERO, run};

#[test]
fn test_transform_requires_catalog() -> Result<()> {
    let test = CliTest::with_file("src/Hero.tsx", HERO)?;

    let (output, stdout, stderr) = run(&mut test.transform_command("src"))?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stdout.is_empty());
    assert!(stderr.starts_with("Error: catalog "));
    assert!(stderr.contains("Run \"parlai extract\" first."));
    assert_eq!(test.read_file("src/Hero.tsx")?, HERO);

    Ok(())
}

#[test]
fn test_transform_rejects_invalid_catalog() -> Result<()> {
    let test = CliTest::with_file("src/Hero.tsx", HERO)?;
    test.write_file("locales/en.json", r#"{ "hero": ["Welcome"] }"#)?;

    let (output, _, stderr) = run(&mut test.transform_command("src"))?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr.contains("invalid catalog"));
    assert!(stderr.contains("\"hero\" must be a string or an object, found an array"));

    Ok(())
}

#[test]
fn test_transform_uses_existing_catalog() -> Result<()> {
    let test = CliTest::with_file("src/Hero.tsx", HERO)?;
    test.write_file(
        "locales/en.json",
        r#"{ "hero": { "email": "Enter your email" } }"#,
    )?;

    let (output, stdout, _) = run(&mut test.transform_command("src"))?;

    assert!(output.status.success());
    assert!(stdout.contains("Scanned 1 file against locales/en.json\n"));
    assert!(stdout.contains("Transformed 1 file (1 replacement)\n"));

    let rewritten = test.read_file("src/Hero.tsx")?;
    assert!(rewritten.contains(r#"<input placeholder={t("hero.email")} />"#));
    assert!(rewritten.contains("<h1>Welcome to our amazing platform</h1>"));

    // Nothing left to do on a second run.
    let (_, stdout, _) = run(&mut test.transform_command("src"))?;
    assert!(stdout.contains("No files needed transformation"));
    assert_eq!(test.read_file("src/Hero.tsx")?, rewritten);

    Ok(())
}

#[test]
fn test_transform_dry_run() -> Result<()> {
    let test = CliTest::with_file("src/Hero.tsx", HERO)?;
    test.write_file(
        "locales/en.json",
        r#"{ "hero": { "email": "Enter your email" } }"#,
    )?;

    let (output, stdout, _) = run(test.transform_command("src").args(["--dry-run", "-v"]))?;

    assert!(output.status.success());
    assert!(stdout.contains("  would transform src/Hero.tsx (1 string)\n"));
    assert!(stdout.contains("Would transform 1 file (1 replacement)\n"));
    assert_eq!(test.read_file("src/Hero.tsx")?, HERO);

    Ok(())
}

#[test]
fn test_transform_with_root_option() -> Result<()> {
    let test = CliTest::with_file("web/src/Hero.tsx", HERO)?;
    test.write_file(
        "web/locales/en.json",
        r#"{ "hero": { "email": "Enter your email" } }"#,
    )?;

    let (output, _, stderr) =
        run(test.transform_command("web/src").args(["--root", "web"]))?;

    assert!(output.status.success(), "stderr: {}", stderr);
    assert!(
        test.read_file("web/src/Hero.tsx")?
            .contains(r#"placeholder={t("hero.email")}"#)
    );

    Ok(())
}
