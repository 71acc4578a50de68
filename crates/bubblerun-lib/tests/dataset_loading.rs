mod common;

use std::fs::{self, File};
use std::io::Write;

use bubblerun_lib::dataset::{dataset_path, download_from_source, ensure_dataset, load_systems};
use bubblerun_lib::faction::{
    cache_file_path, faction_systems, load_faction_systems, read_faction_cache,
    write_faction_cache, InfluenceReport,
};
use bubblerun_lib::search::find_anagram_systems;
use bubblerun_lib::Error;
use common::{fixture_dataset_path, FIXTURE_FACTION};
use flate2::write::GzEncoder;
use flate2::Compression;
use tempfile::tempdir;

const DATASET_SOURCE_ENV: &str = "BUBBLERUN_DATASET_SOURCE";

fn names<'a>(records: impl IntoIterator<Item = &'a bubblerun_lib::SystemRecord>) -> Vec<&'a str> {
    records.into_iter().map(|record| record.name.as_str()).collect()
}

fn gzip_fixture(target: &std::path::Path) -> std::io::Result<()> {
    let mut encoder = GzEncoder::new(File::create(target)?, Compression::default());
    encoder.write_all(&fs::read(fixture_dataset_path())?)?;
    encoder.finish()?;
    Ok(())
}

#[test]
fn malformed_records_are_dropped() -> bubblerun_lib::Result<()> {
    let records = load_systems(&fixture_dataset_path())?;
    assert_eq!(records.len(), 8);
    assert!(!names(&records).contains(&"Broken"));

    let achenar = records
        .iter()
        .find(|record| record.name == "Achenar")
        .expect("Achenar kept without factions");
    assert!(achenar.factions.is_empty());
    Ok(())
}

#[test]
fn gzip_dumps_load_transparently() -> bubblerun_lib::Result<()> {
    let temp_dir = tempdir()?;
    let compressed = temp_dir.path().join("systemsPopulated.json.gz");
    gzip_fixture(&compressed)?;

    let plain = load_systems(&fixture_dataset_path())?;
    let unpacked = load_systems(&compressed)?;
    assert_eq!(plain, unpacked);
    Ok(())
}

#[test]
fn local_source_is_decompressed_into_place() -> bubblerun_lib::Result<()> {
    let temp_dir = tempdir()?;
    let compressed = temp_dir.path().join("dump.json.gz");
    gzip_fixture(&compressed)?;

    let target = dataset_path(&temp_dir.path().join("data"));
    download_from_source(&target, &compressed)?;

    assert_eq!(fs::read(&target)?, fs::read(fixture_dataset_path())?);
    Ok(())
}

#[test]
fn missing_source_is_reported() {
    let temp_dir = tempdir().expect("tempdir");
    let err = download_from_source(
        &temp_dir.path().join("systemsPopulated.json"),
        &temp_dir.path().join("nope.json.gz"),
    )
    .expect_err("missing source");
    assert!(matches!(err, Error::DatasetNotFound { .. }));
}

#[test]
fn ensure_dataset_downloads_only_when_needed() -> bubblerun_lib::Result<()> {
    let temp_dir = tempdir()?;
    std::env::set_var(DATASET_SOURCE_ENV, fixture_dataset_path());
    let first = ensure_dataset(temp_dir.path(), false);
    std::env::remove_var(DATASET_SOURCE_ENV);
    let path = first?;

    assert_eq!(path, dataset_path(temp_dir.path()));
    fs::write(&path, "[]")?;

    // Present and not refreshed: left alone, no source needed.
    let again = ensure_dataset(temp_dir.path(), false)?;
    assert_eq!(fs::read_to_string(again)?, "[]");
    Ok(())
}

#[test]
fn faction_filter_skips_zero_influence() -> bubblerun_lib::Result<()> {
    let records = load_systems(&fixture_dataset_path())?;
    let members = faction_systems(&records, FIXTURE_FACTION);
    assert_eq!(
        names(&members),
        vec!["Antai", "Arun", "Wuy jugun", "Kunti", "Akbakara"]
    );
    Ok(())
}

#[test]
fn faction_cache_round_trips() -> bubblerun_lib::Result<()> {
    let temp_dir = tempdir()?;
    let records = faction_systems(&load_systems(&fixture_dataset_path())?, FIXTURE_FACTION);
    let path = cache_file_path(temp_dir.path(), FIXTURE_FACTION);

    write_faction_cache(&path, &records)?;
    assert_eq!(read_faction_cache(&path)?, records);
    assert!(fs::read_to_string(&path)?.contains("\n  {"));
    Ok(())
}

#[test]
fn faction_systems_prefer_the_cache() -> bubblerun_lib::Result<()> {
    let data_dir = tempdir()?;
    let cache_dir = tempdir()?;
    fs::copy(fixture_dataset_path(), dataset_path(data_dir.path()))?;

    let scanned = load_faction_systems(data_dir.path(), cache_dir.path(), FIXTURE_FACTION, false)?;
    assert_eq!(scanned.len(), 5);
    assert!(cache_file_path(cache_dir.path(), FIXTURE_FACTION).exists());

    // With the dump gone only the cache can answer.
    fs::remove_file(dataset_path(data_dir.path()))?;
    let cached = load_faction_systems(data_dir.path(), cache_dir.path(), FIXTURE_FACTION, false)?;
    assert_eq!(cached, scanned);

    let err = load_faction_systems(data_dir.path(), cache_dir.path(), FIXTURE_FACTION, true)
        .expect_err("refresh needs the dump");
    assert!(matches!(err, Error::DatasetNotFound { .. }));
    Ok(())
}

#[test]
fn influence_report_on_fixture() -> bubblerun_lib::Result<()> {
    let members = faction_systems(&load_systems(&fixture_dataset_path())?, FIXTURE_FACTION);
    let report = InfluenceReport::build(&members, FIXTURE_FACTION);

    let anti: Vec<&str> = report.anti.iter().map(|e| e.name.as_str()).collect();
    let pro: Vec<&str> = report.pro.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(anti, vec!["Wuy jugun", "Antai"]);
    assert_eq!(pro, vec!["Arun", "Kunti"]);
    Ok(())
}

#[test]
fn anagram_search_on_fixture() -> bubblerun_lib::Result<()> {
    let records = load_systems(&fixture_dataset_path())?;
    assert_eq!(names(find_anagram_systems(&records, "UNRA")), vec!["Arun"]);
    assert!(find_anagram_systems(&records, "XYZ").is_empty());
    Ok(())
}
