//! Unit tests for the countdown timer

use std::time::Duration;

use crate::domain::entities::countdown_timer::{format_mm_ss, CountdownTimer};

#[test]
fn test_format_mm_ss() {
    assert_eq!(format_mm_ss(0), "00:00");
    assert_eq!(format_mm_ss(9), "00:09");
    assert_eq!(format_mm_ss(65), "01:05");
    assert_eq!(format_mm_ss(300), "05:00");
    assert_eq!(format_mm_ss(3600), "60:00");
    assert_eq!(format_mm_ss(6000), "100:00");
}

#[test]
fn test_new_timer_is_stopped() {
    let timer = CountdownTimer::new(180);
    assert_eq!(timer.total_seconds(), 180);
    assert_eq!(timer.remaining_seconds(), 0);
    assert!(!timer.is_running());
    assert_eq!(timer.formatted(), "00:00");
}

#[tokio::test(start_paused = true)]
async fn test_start_counts_down_one_per_second() {
    let timer = CountdownTimer::new(300);
    timer.start();
    assert_eq!(timer.remaining_seconds(), 300);
    assert!(timer.is_running());

    tokio::time::advance(Duration::from_millis(500)).await;
    assert_eq!(timer.remaining_seconds(), 300);

    tokio::time::advance(Duration::from_millis(500)).await;
    assert_eq!(timer.remaining_seconds(), 299);

    tokio::time::advance(Duration::from_secs(234)).await;
    assert_eq!(timer.remaining_seconds(), 65);
    assert_eq!(timer.formatted(), "01:05");
}

#[tokio::test(start_paused = true)]
async fn test_stops_at_zero() {
    let timer = CountdownTimer::new(3);
    timer.start();

    tokio::time::advance(Duration::from_secs(10)).await;
    assert_eq!(timer.remaining_seconds(), 0);
    assert!(!timer.is_running());
}

#[tokio::test(start_paused = true)]
async fn test_reset_zeroes_and_stops() {
    let timer = CountdownTimer::new(60);
    let rx = timer.subscribe();
    timer.start();
    tokio::time::advance(Duration::from_secs(5)).await;

    timer.reset();
    assert_eq!(timer.remaining_seconds(), 0);
    assert_eq!(*rx.borrow(), 0);

    tokio::time::advance(Duration::from_secs(5)).await;
    tokio::task::yield_now().await;
    assert_eq!(timer.remaining_seconds(), 0);
    assert_eq!(*rx.borrow(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_restart_resets_to_total() {
    let timer = CountdownTimer::new(120);
    timer.start();
    tokio::time::advance(Duration::from_secs(100)).await;
    assert_eq!(timer.remaining_seconds(), 20);

    timer.start();
    assert_eq!(timer.remaining_seconds(), 120);
}

#[tokio::test(start_paused = true)]
async fn test_subscribers_see_ticks() {
    let timer = CountdownTimer::new(10);
    timer.start();
    let mut rx = timer.subscribe();
    assert_eq!(*rx.borrow(), 10);

    tokio::time::advance(Duration::from_secs(1)).await;
    rx.changed().await.unwrap();
    assert_eq!(*rx.borrow_and_update(), 9);

    tokio::time::advance(Duration::from_secs(1)).await;
    rx.changed().await.unwrap();
    assert_eq!(*rx.borrow_and_update(), 8);
}

#[tokio::test(start_paused = true)]
async fn test_zero_total_never_runs() {
    let timer = CountdownTimer::new(0);
    timer.start();
    assert!(!timer.is_running());
}

#[test]
fn test_start_outside_runtime_keeps_deadline() {
    let timer = CountdownTimer::new(60);
    timer.start();

    assert!(timer.is_running());
    assert!(timer.remaining_seconds() > 55);
    assert_eq!(*timer.subscribe().borrow(), 60);

    timer.reset();
    assert!(!timer.is_running());
    assert_eq!(*timer.subscribe().borrow(), 0);
}
