//! Tests for the progress module functionality.
//!
//! Runs downloads through a [`ProgressSink`] and checks the bar follows the
//! segments accepted by the wrapped sink.

use rangefetch::chunk::ByteRange;
use rangefetch::downloader::{ChunkDownloaderBuilder, TaskState};
use rangefetch::progress::{expected_len, ProgressBarOpts, ProgressSink};

use indicatif::ProgressBar;
use wiremock::matchers::method;
use wiremock::{Mock, ResponseTemplate};

mod common;
use common::helpers::*;

#[test]
fn test_bar_sized_from_request() {
    let downloader = ChunkDownloaderBuilder::new("http://example.com/file.bin")
        .range(ByteRange::new(1000, None))
        .expected_total_size(5000)
        .build();
    assert_eq!(expected_len(downloader.request()), Some(4000));

    let sink = ProgressSink::new(
        RecordingSink::new(),
        downloader.request(),
        ProgressBarOpts::hidden(),
    );
    assert!(sink.progress_bar().is_hidden());
}

#[tokio::test]
async fn test_progress_follows_download() {
    let server = start_mock_server().await;
    let content = create_test_content(150 * 1024);
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(content.clone()))
        .mount(&server)
        .await;

    let downloader = ChunkDownloaderBuilder::new(test_file_url(&server)).build();
    let recorder = RecordingSink::new();
    let pb = ProgressBar::hidden();
    let sink = ProgressSink::with_progress_bar(recorder.clone(), pb.clone(), false);
    let state = downloader.start(sink).unwrap().await.unwrap();

    assert_eq!(state, TaskState::Finished);
    assert_eq!(pb.position(), content.len() as u64);
    assert!(pb.is_finished());
    assert_contiguous(&recorder.accepted(), 0, &content);
    assert_eq!(recorder.single_finish().code(), 200);
}

#[tokio::test]
async fn test_progress_stops_at_rejection() {
    let server = start_mock_server().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(create_test_content(4096)))
        .mount(&server)
        .await;

    let downloader = ChunkDownloaderBuilder::new(test_file_url(&server)).build();
    let recorder = RecordingSink::rejecting_at(0);
    let pb = ProgressBar::hidden();
    let sink = ProgressSink::with_progress_bar(recorder.clone(), pb.clone(), false);
    downloader.start(sink).unwrap().await.unwrap();

    assert_eq!(pb.position(), 0);
    assert!(pb.is_finished());
    assert_eq!(recorder.single_finish().code(), -4);
}
