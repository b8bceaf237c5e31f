//! Split command implementation.

use crate::cli::SplitArgs;
use crate::config::AppConfig;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use eventframe_corpus::{load_corpus, save_corpus, StratifiedSplitter};

/// Execute the split command.
pub async fn execute_split(
    args: SplitArgs,
    config: &AppConfig,
    formatter: &Formatter,
) -> Result<()> {
    let mut split_config = config.split.clone();
    if let Some(dev) = args.dev {
        split_config.dev_fraction = dev;
    }
    if let Some(test) = args.test {
        split_config.test_fraction = test;
    }
    if let Some(seed) = args.seed {
        split_config.seed = seed;
    }
    if args.no_oversample {
        split_config.oversample_train = false;
    }
    split_config.validate().map_err(CliError::Config)?;

    let records = load_corpus(&args.input)?;
    let split = StratifiedSplitter::new(split_config).split(records)?;

    println!("{}", formatter.format_split(&split.counts())?);

    for (name, records) in [
        ("train", &split.train),
        ("dev", &split.dev),
        ("test", &split.test),
    ] {
        let path = args.output_dir.join(format!("{}.json", name));
        save_corpus(&path, records)?;
        eprintln!("{}", formatter.file_written(&path, records.len()));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;
    use eventframe_corpus::{CorpusRecord, LabelCounts};
    use eventframe_domain::Label;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_split_writes_three_files() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("balanced.json");
        let output_dir = dir.path().join("data");

        let mut records: Vec<CorpusRecord> = (0..40)
            .map(|i| CorpusRecord::labeled(format!("brak {}", i), Label::NoEvent))
            .collect();
        records.extend((0..20).map(|i| CorpusRecord::labeled(format!("polityka {}", i), Label::Politics)));
        records.push(CorpusRecord::labeled("błąd", Label::ErrorApi));
        save_corpus(&input, &records).unwrap();

        let args = SplitArgs {
            input,
            output_dir: output_dir.clone(),
            dev: Some(0.1),
            test: Some(0.1),
            seed: None,
            no_oversample: true,
        };
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        execute_split(args, &AppConfig::default(), &formatter)
            .await
            .unwrap();

        let train = load_corpus(&output_dir.join("train.json")).unwrap();
        let dev = load_corpus(&output_dir.join("dev.json")).unwrap();
        let test = load_corpus(&output_dir.join("test.json")).unwrap();

        assert_eq!(train.len() + dev.len() + test.len(), 60);
        assert_eq!(LabelCounts::from_records(&dev).get(Label::Politics), 2);
        assert!(train.iter().all(|r| r.label != Some(Label::ErrorApi)));
    }

    #[tokio::test]
    async fn test_split_rejects_bad_fractions() {
        let dir = TempDir::new().unwrap();
        let args = SplitArgs {
            input: dir.path().join("balanced.json"),
            output_dir: dir.path().to_path_buf(),
            dev: Some(0.6),
            test: Some(0.6),
            seed: None,
            no_oversample: false,
        };
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        let result = execute_split(args, &AppConfig::default(), &formatter).await;
        assert!(matches!(result, Err(CliError::Config(_))));
    }
}
