//! End-to-end pipeline tests: files on disk -> long table -> model spec
//! -> (stubbed) fitted model -> per-group credible intervals -> ranking.

use inferir::prelude::*;
use inferir::synthetic::{accuracy_records, posterior_draws, SyntheticConfig};
use std::fs;
use std::io::Write;

/// Writes one JSON result file per synthetic participant and returns
/// the paths.
fn write_participant_files(
    dir: &tempfile::TempDir,
    config: &SyntheticConfig,
) -> Vec<std::path::PathBuf> {
    accuracy_records(config)
        .iter()
        .enumerate()
        .map(|(i, record)| {
            let path = dir.path().join(format!("sub{:02}.json", i + 1));
            let mut file = fs::File::create(&path).expect("temp dir is writable");
            let json = serde_json::to_string(record).expect("records serialize");
            file.write_all(json.as_bytes()).expect("temp dir is writable");
            path
        })
        .collect()
}

#[test]
fn load_from_disk_produces_expected_row_count() {
    let dir = tempfile::tempdir().expect("temp dir");
    let config = SyntheticConfig::default().with_participants(3).with_trials(8);
    let paths = write_participant_files(&dir, &config);

    let table = load_participants(&paths).expect("well-formed files");
    assert_eq!(table.n_rows(), 3 * 26 * 8 * 3);
    assert_eq!(table.participants().len(), 3);
}

#[test]
fn missing_file_is_io_error() {
    let err = load_participants(&["/nonexistent/sub01.json"]).expect_err("no such file");
    assert!(matches!(err, InferirError::Io(_)));
}

#[test]
fn malformed_json_is_schema_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("sub01.json");
    fs::write(&path, r#"{ "regions": [ { "feature1": [1] } ] }"#).expect("writable");

    let err = load_participants(&[path]).expect_err("missing class columns");
    assert!(matches!(err, InferirError::Schema { .. }));
}

#[test]
fn wide_round_trip_survives_disk() {
    let dir = tempfile::tempdir().expect("temp dir");
    let config = SyntheticConfig::default().with_participants(1).with_trials(6).with_seed(9);
    let records = accuracy_records(&config);
    let paths = write_participant_files(&dir, &config);

    let table = load_participants(&paths).expect("well-formed files");
    for (pos, region) in Region::ALL.iter().enumerate() {
        let wide = table
            .to_wide(ParticipantId(1), *region)
            .expect("every group is present");
        let source = &records[0].regions[pos];
        let as_bools = |cells: &[inferir::observations::Cell]| -> Vec<bool> {
            cells
                .iter()
                .map(|c| match c {
                    inferir::observations::Cell::Bool(b) => *b,
                    inferir::observations::Cell::Int(n) => *n == 1,
                })
                .collect()
        };
        assert_eq!(wide.feature1, as_bools(&source.feature1));
        assert_eq!(wide.feature2, as_bools(&source.feature2));
        assert_eq!(wide.object, as_bools(&source.object));
    }
}

/// Minimal in-memory stand-in for the external fitting collaborator.
struct StubFit {
    diagnostics: FitDiagnostics,
    expectation: Matrix<f32>,
}

impl FittedModel for StubFit {
    fn diagnostics(&self) -> &FitDiagnostics {
        &self.diagnostics
    }

    fn expectation_draws(&self) -> Result<Matrix<f32>> {
        Ok(self.expectation.clone())
    }

    fn predictive_draws(&self) -> Result<Matrix<f32>> {
        // Thresholded expectations stand in for simulated outcomes.
        let (rows, cols) = self.expectation.shape();
        let data = self
            .expectation
            .as_slice()
            .iter()
            .map(|&p| if p >= 0.5 { 1.0 } else { 0.0 })
            .collect();
        Matrix::from_vec(rows, cols, data)
    }
}

struct StubSampler;

impl Sampler for StubSampler {
    fn fit(&self, table: &ObservationTable, spec: &ModelSpec) -> Result<Box<dyn FittedModel>> {
        spec.validate()?;
        let expectation = posterior_draws(table, 80, spec.sampler.seed)?;
        Ok(Box::new(StubFit {
            diagnostics: FitDiagnostics::new(),
            expectation,
        }))
    }
}

#[test]
fn full_workflow_through_sampler_seam() {
    let records = accuracy_records(&SyntheticConfig::default().with_trials(5));
    let table = ObservationTable::from_records(&records).expect("well-formed");

    let spec = ModelSpec::new(
        ModelFormula::new()
            .with_class_effect()
            .with_random(RandomTerm::intercept(GroupField::Region).with_class_slope()),
    )
    .with_prior(PriorSpec::new(
        ParameterClass::Intercept,
        Prior::StudentT {
            nu: 3.0,
            mu: 0.0,
            sigma: 2.5,
        },
    ))
    .with_prior(PriorSpec::new(
        ParameterClass::GroupSd,
        Prior::Exponential { rate: 1.0 },
    ));

    let fitted = StubSampler.fit(&table, &spec).expect("stub always fits");
    assert!(fitted.diagnostics().is_clean());

    let draws = fitted
        .draws(PosteriorQuery::Expectation)
        .expect("stub provides draws");
    let by_region_class = summarize(
        &draws,
        &table,
        Grouping::none().by_region().by_class(),
    )
    .expect("shapes match");
    assert_eq!(by_region_class.len(), 26 * 3);
    for row in &by_region_class {
        assert!(row.ymin <= row.ymax);
    }
    // 80 draws x 5 trials x 2 participants per group, comfortably above
    // the resolution floor.
    assert!(low_resolution(&by_region_class).is_empty());
}

#[test]
fn draws_from_wrong_table_are_rejected() {
    let small = ObservationTable::from_records(&accuracy_records(
        &SyntheticConfig::default().with_participants(1).with_trials(2),
    ))
    .expect("well-formed");
    let large = ObservationTable::from_records(&accuracy_records(
        &SyntheticConfig::default().with_participants(1).with_trials(3),
    ))
    .expect("well-formed");

    let draws = posterior_draws(&small, 10, 0).expect("non-empty");
    let err = summarize(&draws, &large, Grouping::none().by_region())
        .expect_err("draws belong to a different table");
    assert!(matches!(err, InferirError::Shape { .. }));
}

#[test]
fn model_sequence_ranks_by_cross_validation() {
    // Pointwise scores as a real workflow would obtain them from the
    // comparison collaborator, one entry per observation.
    let n = 30;
    let null = CvCriterion::from_pointwise(vec![-0.69; n]);
    let class = CvCriterion::from_pointwise(
        (0..n).map(|i| if i % 3 == 0 { -0.40 } else { -0.55 }).collect(),
    );
    let hierarchical = CvCriterion::from_pointwise(vec![-0.45; n]);

    let ranked = compare(&[
        ("null", null),
        ("class", class),
        ("hierarchical", hierarchical),
    ])
    .expect("aligned criteria");

    assert_eq!(ranked[0].elpd_diff, 0.0);
    assert!(ranked
        .windows(2)
        .all(|pair| pair[0].elpd >= pair[1].elpd));
    assert_eq!(ranked[2].name, "null");
    assert!(ranked[2].se_diff >= 0.0);
}

#[test]
fn convergence_problems_surface_as_warnings_not_errors() {
    let diagnostics = FitDiagnostics::new()
        .with_parameter(inferir::model::ParameterDiagnostics::new(
            "sd_trial__Intercept",
            150.0,
            1.06,
        ))
        .with_divergent(3);

    let warnings = diagnostics.warnings();
    assert_eq!(warnings.len(), 3);
    assert!(warnings
        .iter()
        .any(|w| matches!(w, ConvergenceWarning::DivergentTransitions { count: 3 })));
}
