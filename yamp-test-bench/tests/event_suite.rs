extern crate libtest_mimic;

use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use libtest_mimic::{Arguments, Failed, Trial};
use yamp_test_bench::event_string;

const TEST_SIZE: usize = 16;

#[derive(Default)]
struct TestData {
    desc: String,
    input_yaml: PathBuf,
    is_error: bool,
    test_event: PathBuf,
}

fn perform_test(data: TestData) -> Result<(), Failed> {
    let input_yaml = fs::read_to_string(&data.input_yaml)?;
    let (actual_event, is_error) = event_string(&input_yaml);

    if data.is_error {
        if !is_error {
            return Err(format!("expected an error, got:\n{actual_event}").into());
        }
        return Ok(());
    }
    if is_error {
        return Err(format!("unexpected error after:\n{actual_event}").into());
    }

    let expected_event = fs::read_to_string(&data.test_event)?.replace("\r\n", "\n");
    if actual_event != expected_event {
        return Err(format!("expected:\n{expected_event}\nactual:\n{actual_event}").into());
    }
    Ok(())
}

fn collect_test(
    dir_name: String,
    test_dir_path: &Path,
    tests: &mut Vec<Trial>,
) -> Result<(), Box<dyn Error>> {
    let mut test_data = TestData::default();
    for entry in fs::read_dir(test_dir_path)? {
        let entry = entry?;
        match entry.file_name().to_str() {
            Some("===") => {
                if let Ok(desc) = fs::read_to_string(entry.path()) {
                    test_data.desc = String::from(desc.trim());
                }
            }
            Some("in.yaml") => test_data.input_yaml = entry.path(),
            Some("error") => test_data.is_error = true,
            Some("test.event") => test_data.test_event = entry.path(),
            _ => {}
        }
    }
    let test = Trial::test(format!("{} ({})", dir_name, &test_data.desc), move || {
        perform_test(test_data)
    });
    tests.push(test);
    Ok(())
}

fn collect_tests(path: &Path) -> Result<Vec<Trial>, Box<dyn Error>> {
    let mut tests = Vec::with_capacity(TEST_SIZE);
    for entry in fs::read_dir(path)? {
        let entry = entry?;
        if !entry.file_type()?.is_dir() {
            continue;
        }
        let dir_name = entry.file_name().to_string_lossy().into_owned();
        collect_test(dir_name, &entry.path(), &mut tests)?;
    }
    tests.sort_by(|a, b| a.name().cmp(b.name()));
    Ok(tests)
}

fn main() -> Result<(), Box<dyn Error>> {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::WARN)
        .with_test_writer()
        .try_init();

    let args = Arguments::from_args();

    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("data");

    let tests = collect_tests(&path)?;

    libtest_mimic::run(&args, tests).exit();
}
