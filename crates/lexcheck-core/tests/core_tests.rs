use std::fs;
use std::path::Path;

use proptest::prelude::*;
use tempfile::TempDir;

use lexcheck_core::config::{Config, EmbeddingBackend};
use lexcheck_core::data_processor::{chunk_text, ChunkingConfig, DataProcessor};
use lexcheck_core::traits::TextExtractor;
use lexcheck_core::{Error, Result};

/// Reads `.txt` verbatim, fails on `.bad`, yields nothing for anything else.
struct TxtOnly;

impl TextExtractor for TxtOnly {
    fn extract(&self, path: &Path) -> Result<String> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("txt") => Ok(fs::read_to_string(path)?.trim().to_string()),
            Some("bad") => Err(Error::extraction(path, "corrupt")),
            _ => Ok(String::new()),
        }
    }
}

#[test]
fn process_directory_single_small_file() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("a.txt"), "Short text\n").unwrap();

    let corpus = DataProcessor::new().process_directory(tmp.path(), &TxtOnly).expect("process");

    assert_eq!(corpus.chunks.len(), 1, "one short file becomes one chunk");
    assert_eq!(corpus.chunks[0].text, "Short text");
    assert_eq!(corpus.chunks[0].file, "a.txt");
    assert_eq!(corpus.chunks[0].total_chunks, 1);
}

#[test]
fn process_directory_skips_empty_and_unsupported_files() {
    let tmp = TempDir::new().unwrap();
    let nested = tmp.path().join("nested");
    fs::create_dir_all(&nested).unwrap();
    fs::write(tmp.path().join("a.txt"), "alpha bravo charlie").unwrap();
    fs::write(tmp.path().join("blank.txt"), "   \n").unwrap();
    fs::write(tmp.path().join("image.png"), [0u8, 1, 2]).unwrap();
    fs::write(nested.join("b.txt"), "delta echo").unwrap();

    let processor = DataProcessor::with_chunking(ChunkingConfig { max_words: 2 });
    let corpus = processor.process_directory(tmp.path(), &TxtOnly).expect("process");

    assert_eq!(corpus.files_scanned, 4);
    assert_eq!(corpus.files_with_text, 2);
    let texts: Vec<&str> = corpus.chunks.iter().map(|c| c.text.as_str()).collect();
    assert_eq!(texts, vec!["alpha bravo", "charlie", "delta echo"]);
    assert_eq!(corpus.chunks[2].file, "b.txt");
    for ch in &corpus.chunks {
        assert!(ch.chunk_index < ch.total_chunks);
    }
}

#[test]
fn process_directory_aborts_on_extraction_error() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("a.txt"), "fine").unwrap();
    fs::write(tmp.path().join("z.bad"), "broken").unwrap();

    let err = DataProcessor::new().process_directory(tmp.path(), &TxtOnly).unwrap_err();
    assert!(matches!(err, Error::Extraction { .. }), "got {err:?}");
}

#[test]
fn process_directory_missing_root() {
    let tmp = TempDir::new().unwrap();
    let err = DataProcessor::new()
        .process_directory(&tmp.path().join("nope"), &TxtOnly)
        .unwrap_err();
    assert!(matches!(err, Error::MissingInput(_)));
}

#[test]
fn chunking_empty_string_yields_nothing() {
    assert!(chunk_text("", 500).is_empty());
}

proptest! {
    #[test]
    fn chunks_rejoin_to_normalized_text(text in "[a-z \n\t]{0,300}", n in 1usize..40) {
        let chunks = chunk_text(&text, n);
        let normalized = text.split_whitespace().collect::<Vec<_>>().join(" ");
        prop_assert_eq!(chunks.join(" "), normalized);
        for chunk in &chunks {
            let words = chunk.split_whitespace().count();
            prop_assert!(words >= 1 && words <= n, "chunk has {} words, limit {}", words, n);
        }
    }
}

#[test]
fn config_defaults_without_files() {
    figment::Jail::expect_with(|_jail| {
        let settings = Config::load().map_err(|e| e.to_string())?.settings().map_err(|e| e.to_string())?;
        assert_eq!(settings.retrieval.chunk_size, 500);
        assert_eq!(settings.retrieval.top_k, 5);
        assert_eq!(settings.embedding.model, "models/text-embedding-004");
        assert_eq!(settings.embedding.backend, EmbeddingBackend::Gemini);
        assert!(settings.paths.index_path().ends_with("data/embeddings/reference.index"));
        Ok(())
    });
}

#[test]
fn config_env_overrides_toml() {
    figment::Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
                [retrieval]
                top_k = 8

                [embedding]
                model = "models/embedding-001"
                backend = "fake"
            "#,
        )?;
        jail.set_env("APP_RETRIEVAL__TOP_K", "3");

        let config = Config::load().map_err(|e| e.to_string())?;
        let settings = config.settings().map_err(|e| e.to_string())?;
        assert_eq!(settings.retrieval.top_k, 3);
        assert_eq!(settings.embedding.model, "models/embedding-001");
        assert_eq!(settings.embedding.backend, EmbeddingBackend::Fake);
        let model: String = config.get("embedding.model").map_err(|e| e.to_string())?;
        assert_eq!(model, "models/embedding-001");
        Ok(())
    });
}

#[test]
fn config_rejects_zero_top_k() {
    figment::Jail::expect_with(|jail| {
        jail.create_file("config.toml", "[retrieval]\ntop_k = 0\n")?;
        assert!(matches!(Config::load(), Err(Error::InvalidConfig(_))));
        Ok(())
    });
}
