// mediaconv-core/tests/ffmpeg_backend_tests.rs
//
// Drives the ffmpeg backend against small shell scripts standing in for
// the real executable.

#![cfg(unix)]

mod common;

use common::{RecordingHandler, create_dummy_file, file_names};
use mediaconv_core::backends::ffmpeg::FfmpegAudioBackend;
use mediaconv_core::events::Event;
use mediaconv_core::{Backend, BackendError, BatchRunner, CoreConfigBuilder, TargetFormat};
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

/// Writes an executable script named `ffmpeg` into `dir`.
fn fake_ffmpeg(dir: &Path, body: &str) -> PathBuf {
    let path = dir.join("ffmpeg");
    fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}

#[test]
fn successful_exit_produces_mp3() -> Result<(), Box<dyn std::error::Error>> {
    let tools = tempdir()?;
    let input_dir = tempdir()?;
    let output_dir = tempdir()?;
    let args_log = tools.path().join("args.txt");
    let program = fake_ffmpeg(
        tools.path(),
        &format!(
            "printf '%s\\n' \"$@\" > '{}'\nfor last; do :; done\nprintf 'ID3' > \"$last\"\nexit 0",
            args_log.display()
        ),
    );
    let source = create_dummy_file(input_dir.path(), "talk.mp4");

    let config = CoreConfigBuilder::new()
        .input_dir(input_dir.path().to_path_buf())
        .output_dir(output_dir.path().to_path_buf())
        .ffmpeg_path(program)
        .build()?;
    let recorder = RecordingHandler::default();

    let report = BatchRunner::from_config(&config).run(input_dir.path(), output_dir.path(), &recorder)?;

    assert_eq!(report.succeeded_count, 1);
    assert_eq!(file_names(output_dir.path()), vec!["talk.mp3"]);

    let target = output_dir.path().join("talk.mp3");
    let recorded: Vec<String> = fs::read_to_string(&args_log)?.lines().map(str::to_owned).collect();
    assert_eq!(
        recorded,
        vec![
            "-y".to_string(),
            "-i".to_string(),
            source.display().to_string(),
            "-vn".to_string(),
            "-acodec".to_string(),
            "libmp3lame".to_string(),
            target.display().to_string(),
        ]
    );
    assert!(recorder.events().iter().any(|e| matches!(
        e,
        Event::AttemptSucceeded { backend, .. } if backend.name() == "ffmpeg"
    )));
    Ok(())
}

#[test]
fn nonzero_exit_reports_stderr_and_removes_partial_output() -> Result<(), Box<dyn std::error::Error>> {
    let tools = tempdir()?;
    let work = tempdir()?;
    let program = fake_ffmpeg(
        tools.path(),
        "for last; do :; done\nprintf 'partial' > \"$last\"\nprintf 'moov atom not found\\n' >&2\nexit 1",
    );
    let source = create_dummy_file(work.path(), "broken.mp4");
    let target = work.path().join("broken.mp3");

    let backend = FfmpegAudioBackend::new(Some(program));
    let err = backend.convert(&source, &target, TargetFormat::Mp3).unwrap_err();

    assert_eq!(
        err,
        BackendError::ExternalProcess {
            exit_code: Some(1),
            diagnostics: "moov atom not found\n".to_string(),
        }
    );
    assert_eq!(err.kind(), "ExternalProcessError");
    assert!(!target.exists());
    Ok(())
}

#[test]
fn failed_video_does_not_stop_images() -> Result<(), Box<dyn std::error::Error>> {
    let tools = tempdir()?;
    let input_dir = tempdir()?;
    let output_dir = tempdir()?;
    let program = fake_ffmpeg(tools.path(), "echo 'no audio stream' >&2\nexit 69");
    create_dummy_file(input_dir.path(), "silent.mp4");
    common::create_png(input_dir.path(), "cover.png");

    let config = CoreConfigBuilder::new()
        .input_dir(input_dir.path().to_path_buf())
        .output_dir(output_dir.path().to_path_buf())
        .ffmpeg_path(program)
        .build()?;

    let report = BatchRunner::from_config(&config).run(input_dir.path(), output_dir.path(), &RecordingHandler::default())?;

    assert_eq!(report.total_candidates, 2);
    assert_eq!(report.succeeded_count, 1);
    let failure = report.failures().next().unwrap();
    assert_eq!(failure.attempts.len(), 1);
    match failure.last_error() {
        Some(BackendError::ExternalProcess { exit_code, diagnostics }) => {
            assert_eq!(*exit_code, Some(69));
            assert_eq!(diagnostics, "no audio stream\n");
        }
        other => panic!("Unexpected error: {:?}", other),
    }
    assert_eq!(file_names(output_dir.path()), vec!["cover.jpg"]);
    Ok(())
}
