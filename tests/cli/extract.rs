use anyhow::Result;
use pretty_assertions::assert_eq;

use crate::{CliTest, HERO, run};

const HERO_REWRITTEN: &str = r#"import { useTranslation } from "react-i18next";

export function Hero() {
    const { t } = useTranslation();
    return (
        <div className="text-lg">
            <h1>{t("hero.welcome_to_our_amazing_platfor")}</h1>
            <input placeholder={t("hero.enter_your_email")} />
        </div>
    );
}
"#;

#[test]
fn test_extract_and_rewrite() -> Result<()> {
    let test = CliTest::with_file("src/components/Hero.tsx", HERO)?;

    let (output, stdout, stderr) = run(&mut test.extract_command("src"))?;

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr);
    assert!(stdout.contains("Scanned 1 file\n"));
    assert!(stdout.contains("  - Total strings found: 2\n"));
    assert!(stdout.contains("  - Strings that will be transformed: 2\n"));
    assert!(stdout.contains("Extracted 2 strings to locales/en.json\n"));
    assert!(stdout.contains("Transformed 1 file (2 replacements)\n"));

    insta::assert_snapshot!(test.read_file("locales/en.json")?.trim_end(), @r#"
    {
      "hero": {
        "welcome_to_our_amazing_platfor": "Welcome to our amazing platform",
        "enter_your_email": "Enter your email"
      }
    }
    "#);
    assert_eq!(test.read_file("src/components/Hero.tsx")?, HERO_REWRITTEN);

    // Runtime setup is created next to the source directory.
    assert!(test.root().join("i18n.config.ts").is_file());
    assert!(test.read_file("i18n.ts")?.contains("./locales/${language}.json"));

    Ok(())
}

#[test]
fn test_extract_twice_is_a_no_op() -> Result<()> {
    let test = CliTest::with_file("src/components/Hero.tsx", HERO)?;

    run(&mut test.extract_command("src"))?;
    let catalog = test.read_file("locales/en.json")?;

    let (output, stdout, _) = run(&mut test.extract_command("src"))?;

    assert!(output.status.success());
    assert!(stdout.contains("No files needed transformation"));
    assert_eq!(test.read_file("src/components/Hero.tsx")?, HERO_REWRITTEN);
    assert_eq!(test.read_file("locales/en.json")?, catalog);

    Ok(())
}

#[test]
fn test_extract_dry_run() -> Result<()> {
    let test = CliTest::with_file("src/components/Hero.tsx", HERO)?;

    let (output, stdout, _) = run(test.extract_command("src").arg("--dry-run"))?;

    assert!(output.status.success());
    assert!(stdout.contains("Would create:\n  - i18n.config.ts\n  - i18n.ts\n"));
    assert!(stdout.contains("Would extract 2 strings to locales/en.json"));
    assert!(stdout.contains("Would transform 1 file (2 replacements)"));
    assert!(stdout.contains("Dry run completed."));

    assert!(!test.root().join("locales").exists());
    assert!(!test.root().join("i18n.ts").exists());
    assert_eq!(test.read_file("src/components/Hero.tsx")?, HERO);

    Ok(())
}

#[test]
fn test_extract_verbose_lists_strings() -> Result<()> {
    let test = CliTest::with_file("src/components/Hero.tsx", HERO)?;

    let (_, stdout, _) = run(test.extract_command("src").args(["--dry-run", "-v"]))?;

    assert!(stdout.contains(
        "hero.welcome_to_our_amazing_platfor  \"Welcome to our amazing platform\"  src/components/Hero.tsx:4"
    ));
    assert!(stdout.contains("would transform src/components/Hero.tsx (2 strings)"));

    Ok(())
}

#[test]
fn test_extract_cleanup() -> Result<()> {
    let test = CliTest::with_file(
        "src/Hero.tsx",
        r#"const banner = "Limited offer for everyone";

export function Hero() {
    return <h1>Welcome to our amazing platform</h1>;
}
"#,
    )?;
    test.write_file("locales/en.json", r#"{ "legacy": { "gone": "Gone" } }"#)?;

    let (output, stdout, _) = run(test.extract_command("src").arg("--cleanup"))?;

    assert!(output.status.success());
    assert!(stdout.contains("  - Skipped 1 string that wouldn't be transformed\n"));
    assert!(stdout.contains("Extracted 1 string to locales/en.json\n"));
    assert!(stdout.contains("  - removed 1 unused key(s)\n"));

    insta::assert_snapshot!(test.read_file("locales/en.json")?.trim_end(), @r#"
    {
      "hero": {
        "welcome_to_our_amazing_platfor": "Welcome to our amazing platform"
      }
    }
    "#);

    Ok(())
}

#[test]
fn test_extract_backup() -> Result<()> {
    let test = CliTest::with_file("src/components/Hero.tsx", HERO)?;

    let (output, stdout, _) = run(test.extract_command("src").arg("--backup"))?;

    assert!(output.status.success());
    assert!(stdout.contains("Backup created at i18n-backup-"));

    let backup = std::fs::read_dir(test.root())?
        .filter_map(|entry| entry.ok())
        .find(|entry| entry.file_name().to_string_lossy().starts_with("i18n-backup-"))
        .expect("backup directory");
    assert_eq!(
        std::fs::read_to_string(backup.path().join("src/components/Hero.tsx"))?,
        HERO
    );

    Ok(())
}

#[test]
fn test_extract_app_router_adds_directive() -> Result<()> {
    let test = CliTest::with_file(
        "app/page.tsx",
        r#"export default function HomePage() {
    return <p>Start building today</p>;
}
"#,
    )?;

    let (output, _, stderr) = run(&mut test.extract_command("app"))?;

    assert!(output.status.success(), "stderr: {}", stderr);
    assert_eq!(
        test.read_file("app/page.tsx")?,
        r#""use client";

import { useTranslation } from "react-i18next";

export default function HomePage() {
    const { t } = useTranslation();
    return <p>{t("page.start_building_today")}</p>;
}
"#
    );

    Ok(())
}

#[test]
fn test_extract_with_config_and_overrides() -> Result<()> {
    let test = CliTest::with_file(
        "app/page.tsx",
        "export default function HomePage() {\n    return <p>Start building today</p>;\n}\n",
    )?;
    test.write_file(
        ".parlairc.json",
        r#"{ "localesDir": "./i18n", "clientDirective": "never" }"#,
    )?;

    let (output, stdout, _) = run(test.extract_command("app").args(["--primary-locale", "de"]))?;

    assert!(output.status.success());
    assert!(stdout.contains("Extracted 1 string to i18n/de.json"));
    assert!(test.root().join("i18n/de.json").is_file());
    assert!(!test.read_file("app/page.tsx")?.contains("use client"));

    Ok(())
}

#[test]
fn test_extract_skips_test_files() -> Result<()> {
    let test = CliTest::with_file("src/components/Hero.tsx", HERO)?;
    test.write_file(
        "src/components/Hero.test.tsx",
        "export function HeroTest() { return <p>Only in tests</p>; }\n",
    )?;

    let (_, stdout, _) = run(test.extract_command("src").arg("--dry-run"))?;

    assert!(stdout.contains("Scanned 1 file\n"));

    Ok(())
}

#[test]
fn test_extract_parse_error_aborts() -> Result<()> {
    let test = CliTest::with_file("src/components/Hero.tsx", HERO)?;
    test.write_file(
        "src/components/Broken.tsx",
        "export function Broken() { return <div>; }",
    )?;

    let (output, _, stderr) = run(&mut test.extract_command("src"))?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr.starts_with("Error: failed to parse "));
    assert!(stderr.contains("Broken.tsx"));
    assert!(!test.root().join("locales").exists());
    assert_eq!(test.read_file("src/components/Hero.tsx")?, HERO);

    Ok(())
}

#[test]
fn test_extract_unrewritable_file_exits_with_failure() -> Result<()> {
    let picker = r#"import { useTranslation, Trans } from "next-i18next";

export function LocalePicker() {
    return (
        <p>
            Choose your language <Trans i18nKey="picker.hint" />
        </p>
    );
}
"#;
    let test = CliTest::with_file("src/components/Hero.tsx", HERO)?;
    test.write_file("src/components/LocalePicker.tsx", picker)?;

    let (output, stdout, stderr) = run(&mut test.extract_command("src"))?;

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr.contains("error: failed to print "));
    assert!(stderr.contains("LocalePicker.tsx"));
    assert!(stdout.contains("Transformed 1 file (2 replacements)\n"));
    assert!(stdout.contains("✘ 1 file could not be rewritten and was left untouched\n"));
    assert!(!stdout.contains("All done!"));

    assert_eq!(test.read_file("src/components/LocalePicker.tsx")?, picker);
    assert_eq!(test.read_file("src/components/Hero.tsx")?, HERO_REWRITTEN);

    Ok(())
}

#[test]
fn test_extract_missing_directory() -> Result<()> {
    let test = CliTest::new()?;

    let (output, _, stderr) = run(&mut test.extract_command("src"))?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr.contains("Directory not found"));

    Ok(())
}

#[test]
fn test_extract_invalid_config() -> Result<()> {
    let test = CliTest::with_file("src/components/Hero.tsx", HERO)?;
    test.write_file(".parlairc.json", r#"{ "lookupFunction": "i18n.t" }"#)?;

    let (output, _, stderr) = run(&mut test.extract_command("src"))?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr.contains("lookupFunction"));

    Ok(())
}
