use std::fs;
use std::path::Path;

use prov_perf::config::{build_sweeps, SelectorConfig, Sweep, SweepPoint};
use prov_perf::sweep::run_selector;
use tempfile::TempDir;

fn lines(path: &Path) -> Vec<String> {
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}

/// A table whose best row carries f-measure `f` and recognisable companions.
fn table_for(f: f64) -> String {
    format!(
        "max,0.0,a,b,c,d,0.1,0.1,0.1,{low}\n\
         mean,0.3,a,b,c,d,{p},{r},{a},{f}\n\
         mean,0.1,a,b,c,d,None,0.9,0.9,0.99\n",
        low = f / 2.0,
        p = f + 0.01,
        r = f + 0.02,
        a = f + 0.03,
        f = f,
    )
}

#[test]
fn series_rows_follow_sweep_order() {
    let dir = TempDir::new().unwrap();
    let fs_values = [0.5, 0.3, 0.7, 0.1, 0.6];
    let points = fs_values
        .iter()
        .enumerate()
        .map(|(i, f)| {
            let input = format!("point-{}.csv", i);
            fs::write(dir.path().join(&input), table_for(*f)).unwrap();
            SweepPoint {
                value: (i * 100).to_string(),
                input,
            }
        })
        .collect();
    let config = SelectorConfig {
        data_dir: dir.path().to_path_buf(),
        sweeps: vec![Sweep {
            name: "window".into(),
            points,
        }],
    };

    let outcomes = run_selector(&config).unwrap();
    assert_eq!(outcomes.len(), 1);

    let expect = |offset: f64| -> Vec<String> {
        fs_values.iter().map(|f| format!("{:?}", f + offset)).collect()
    };
    assert_eq!(lines(&dir.path().join("window-f-measure-perf.txt")), expect(0.0));
    assert_eq!(lines(&dir.path().join("window-precision-perf.txt")), expect(0.01));
    assert_eq!(lines(&dir.path().join("window-recall-perf.txt")), expect(0.02));
    assert_eq!(lines(&dir.path().join("window-accuracy-perf.txt")), expect(0.03));
}

#[test]
fn point_without_complete_rows_publishes_none() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("good.csv"), table_for(0.5)).unwrap();
    fs::write(
        dir.path().join("empty.csv"),
        "mean,0.1,a,b,c,d,None,0.9,0.9,0.9\nmax,0.0,a,b,c,d,0.9,0.9,0.9,None\n",
    )
    .unwrap();
    let config = SelectorConfig {
        data_dir: dir.path().to_path_buf(),
        sweeps: vec![Sweep {
            name: "hop".into(),
            points: vec![
                SweepPoint {
                    value: "1".into(),
                    input: "empty.csv".into(),
                },
                SweepPoint {
                    value: "2".into(),
                    input: "good.csv".into(),
                },
            ],
        }],
    };

    run_selector(&config).unwrap();
    for metric in ["f-measure", "precision", "recall", "accuracy"] {
        let series = lines(&dir.path().join(format!("hop-{}-perf.txt", metric)));
        assert_eq!(series.len(), 2);
        assert_eq!(series[0], "None");
        assert_ne!(series[1], "None");
    }
}

#[test]
fn series_are_appended_across_runs() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("t.csv"), table_for(0.5)).unwrap();
    let config = SelectorConfig {
        data_dir: dir.path().to_path_buf(),
        sweeps: vec![Sweep {
            name: "sketch".into(),
            points: vec![SweepPoint {
                value: "500".into(),
                input: "t.csv".into(),
            }],
        }],
    };
    run_selector(&config).unwrap();
    run_selector(&config).unwrap();
    assert_eq!(
        lines(&dir.path().join("sketch-f-measure-perf.txt")),
        vec!["0.5".to_string(), "0.5".to_string()]
    );
}

#[test]
fn default_sweeps_read_the_stats_tables() {
    let dir = TempDir::new().unwrap();
    let sweeps = build_sweeps();
    for sweep in &sweeps {
        for point in &sweep.points {
            fs::write(dir.path().join(&point.input), table_for(0.5)).unwrap();
        }
    }
    let config = SelectorConfig {
        data_dir: dir.path().to_path_buf(),
        sweeps,
    };
    let outcomes = run_selector(&config).unwrap();
    assert_eq!(outcomes.len(), 3);
    for name in ["sketch", "window", "hop"] {
        assert_eq!(lines(&dir.path().join(format!("{}-recall-perf.txt", name))).len(), 5);
    }
}
