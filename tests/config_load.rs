//! Config file round-trips

use castle_crawler::config::Config;
use tempfile::tempdir;

#[tokio::test]
async fn default_file_loads_back() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("crawler.toml");
    let path = path.to_str().unwrap();

    Config::create_default(path).await.unwrap();
    let config = Config::load(path).await.unwrap();
    assert_eq!(config.world.grid_min, -5);
    assert_eq!(config.world.grid_max, 5);
    assert_eq!(config.logging.level, "info");
    assert!(config.world.seed.is_none());
}

#[tokio::test]
async fn seed_and_level_are_read() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("crawler.toml");
    std::fs::write(
        &path,
        "[world]\ngrid_min = -3\ngrid_max = 3\nseed = 99\n\n[logging]\nlevel = \"debug\"\n",
    )
    .unwrap();
    let config = Config::load(path.to_str().unwrap()).await.unwrap();
    assert_eq!(config.world.seed, Some(99));
    assert_eq!(config.world.grid_min, -3);
    assert_eq!(config.world.room_probability, 0.7);
    assert_eq!(config.logging.level, "debug");
}

#[tokio::test]
async fn invalid_world_is_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("crawler.toml");
    std::fs::write(&path, "[world]\ngrid_max = 0\n").unwrap();
    let err = Config::load(path.to_str().unwrap()).await.unwrap_err();
    assert!(err.to_string().contains("grid_max"));
}

#[tokio::test]
async fn missing_file_is_an_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nope.toml");
    assert!(Config::load(path.to_str().unwrap()).await.is_err());
}

#[tokio::test]
async fn optional_load_distinguishes_missing_from_broken() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("absent.toml");
    assert!(Config::load_optional(missing.to_str().unwrap())
        .await
        .unwrap()
        .is_none());

    let present = dir.path().join("crawler.toml");
    std::fs::write(&present, "[world]\nseed = 5\n").unwrap();
    let config = Config::load_optional(present.to_str().unwrap())
        .await
        .unwrap()
        .expect("config present");
    assert_eq!(config.world.seed, Some(5));

    std::fs::write(&present, "[world]\ngrid_min = 3\n").unwrap();
    assert!(Config::load_optional(present.to_str().unwrap()).await.is_err());
}

#[tokio::test]
async fn oversized_grid_is_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("crawler.toml");
    std::fs::write(&path, "[world]\ngrid_min = -5\ngrid_max = 2147483647\n").unwrap();
    let err = Config::load(path.to_str().unwrap()).await.unwrap_err();
    assert!(err.to_string().contains("at most"));
}
