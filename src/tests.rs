#[cfg(test)]
mod placement_render_tests {
    use crate::font_source::testing::BlockGlyphs;
    use crate::geometry::CanvasSpec;
    use crate::placement::sample_placement;
    use crate::rendering::{rasterize, RenderRequest};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn test_sampled_placements_always_render() {
        let canvas = CanvasSpec::new(96, 64);
        let glyphs = BlockGlyphs::default();
        let mut rng = StdRng::seed_from_u64(25102025);

        for _ in 0..100 {
            let size = rng.gen_range(8.0..=40.0);
            let rotation = rng.gen_range(-45.0..=45.0);
            let sample = sample_placement(&mut rng, &glyphs, 'k', size, rotation, &canvas).unwrap();
            let request = RenderRequest {
                ch: 'k',
                size: sample.size,
                x: sample.x,
                y: sample.y,
                rotation: sample.rotation_degrees,
                canvas,
            };
            let image = rasterize(&glyphs, &request)
                .unwrap_or_else(|e| panic!("{sample:?} did not render: {e}"));
            assert!(image.pixels().any(|p| p.0[0] > 0), "{sample:?} left no ink");
        }
    }
}

#[cfg(test)]
mod validity_tests {
    use crate::core::settings::CorpusSettings;
    use crate::font_source::testing::BlockGlyphs;
    use crate::validity::{FontValidityTester, Verdict};

    #[test]
    fn test_default_probe_rejects_identical_glyphs() {
        let settings = CorpusSettings::default();
        let tester = FontValidityTester::new(
            settings.probe_letters(),
            settings.probe_size,
            settings.probe_canvas(),
            settings.max_identical,
        );
        // every letter is the same block
        let verdict = tester.check(&BlockGlyphs::default());
        assert_eq!(verdict, Verdict::DuplicateGlyphs { count: 59 });
    }
}

#[cfg(test)]
mod corpus_table_tests {
    use crate::corpus::{join_usage_stats, FontCandidate};
    use crate::data::corpus_table::{load_ttf_paths, save_corpus};
    use crate::data::UsageStats;
    use std::path::PathBuf;

    #[test]
    fn test_generate_reads_back_assembled_paths() {
        let stats = UsageStats::from_json(
            r#"[{"family": "Lora", "views": 10}, {"family": "Arvo", "views": 3}]"#,
        )
        .unwrap();
        let fonts = ["Lora", "Arvo", "Unknown"]
            .iter()
            .map(|family| FontCandidate {
                family: family.to_string(),
                category: "SERIF".to_string(),
                filename: format!("{family}-Regular.ttf"),
                ttf_path: PathBuf::from(format!(
                    "ofl/{}/{family}-Regular.ttf",
                    family.to_lowercase()
                )),
            })
            .collect();
        let rows = join_usage_stats(fonts, &stats);

        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("corpus.csv");
        save_corpus(&path, &rows).unwrap();

        let paths = load_ttf_paths(&path).unwrap();
        assert_eq!(
            paths,
            [
                PathBuf::from("ofl/arvo/Arvo-Regular.ttf"),
                PathBuf::from("ofl/lora/Lora-Regular.ttf"),
            ]
        );
    }
}

#[cfg(test)]
mod dataset_tests {
    use crate::core::ConfigFile;
    use crate::dataset::{letter_dir_name, DatasetGenerator};
    use crate::font_source::testing::BlockGlyphs;
    use std::fs;
    use std::path::Path;

    #[test]
    fn test_default_settings_fill_every_letter_dir() {
        let mut config = ConfigFile::default();
        config.generation.samples_per_font = 2;
        config.generation.letters = "xYß".to_string();

        let temp = tempfile::tempdir().unwrap();
        let generator =
            DatasetGenerator::new(config.generation.clone(), temp.path().join("out")).unwrap();
        generator.prepare_output().unwrap();
        let written = generator
            .generate_font(&BlockGlyphs::default(), Path::new("Sample-Regular.ttf"), 3)
            .unwrap();
        assert_eq!(written, 6);

        for letter in config.generation.letters() {
            let dir = temp.path().join("out").join(letter_dir_name(letter));
            assert_eq!(fs::read_dir(&dir).unwrap().count(), 2, "{}", dir.display());
        }
    }
}
