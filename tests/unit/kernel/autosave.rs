use super::*;

#[test]
fn test_clamp_interval_bounds() {
    assert_eq!(clamp_interval(0), MIN_INTERVAL_SECS);
    assert_eq!(clamp_interval(5), 5);
    assert_eq!(clamp_interval(30), 30);
    assert_eq!(clamp_interval(301), MAX_INTERVAL_SECS);
}

#[test]
fn test_manual_mode_saves_on_every_change_and_never_arms() {
    let mut scheduler = AutosaveScheduler::new(false, 30);
    let t0 = Instant::now();
    scheduler.start(t0);

    assert_eq!(scheduler.mode(), AutosaveMode::Manual);
    assert!(!scheduler.is_armed());
    assert!(scheduler.on_content_changed());
    assert!(!scheduler.poll(t0 + Duration::from_secs(3600)));
}

#[test]
fn test_timer_mode_fires_once_per_boundary() {
    let mut scheduler = AutosaveScheduler::new(true, 10);
    let t0 = Instant::now();
    scheduler.start(t0);

    assert_eq!(scheduler.mode(), AutosaveMode::Timer);
    assert!(!scheduler.on_content_changed());
    assert_eq!(scheduler.next_fire(), Some(t0 + Duration::from_secs(10)));

    assert!(!scheduler.poll(t0 + Duration::from_secs(9)));
    assert!(scheduler.poll(t0 + Duration::from_secs(10)));
    assert!(!scheduler.poll(t0 + Duration::from_secs(11)));
    assert!(scheduler.poll(t0 + Duration::from_secs(20)));
}

#[test]
fn test_missed_boundaries_collapse() {
    let mut scheduler = AutosaveScheduler::new(true, 5);
    let t0 = Instant::now();
    scheduler.start(t0);

    assert!(scheduler.poll(t0 + Duration::from_secs(23)));
    assert!(!scheduler.poll(t0 + Duration::from_secs(24)));
    assert_eq!(scheduler.next_fire(), Some(t0 + Duration::from_secs(25)));
}

#[test]
fn test_configure_restarts_from_zero() {
    let mut scheduler = AutosaveScheduler::new(true, 30);
    let t0 = Instant::now();
    scheduler.start(t0);

    let t1 = t0 + Duration::from_secs(25);
    assert!(scheduler.configure(true, 10, t1));
    assert_eq!(scheduler.next_fire(), Some(t1 + Duration::from_secs(10)));
    assert!(!scheduler.poll(t0 + Duration::from_secs(30)));
    assert!(scheduler.poll(t1 + Duration::from_secs(10)));
}

#[test]
fn test_configure_unchanged_keeps_schedule() {
    let mut scheduler = AutosaveScheduler::new(true, 30);
    let t0 = Instant::now();
    scheduler.start(t0);

    assert!(!scheduler.configure(true, 30, t0 + Duration::from_secs(10)));
    assert_eq!(scheduler.next_fire(), Some(t0 + Duration::from_secs(30)));
}

#[test]
fn test_configure_clamps_and_disables() {
    let mut scheduler = AutosaveScheduler::new(true, 30);
    let t0 = Instant::now();
    scheduler.start(t0);

    assert!(scheduler.configure(true, 1, t0));
    assert_eq!(scheduler.interval_secs(), MIN_INTERVAL_SECS);

    assert!(scheduler.configure(false, 5, t0));
    assert!(!scheduler.is_armed());
    assert_eq!(scheduler.mode(), AutosaveMode::Manual);
}

#[test]
fn test_teardown_cancels_timer() {
    let mut scheduler = AutosaveScheduler::new(true, 5);
    let t0 = Instant::now();
    scheduler.start(t0);
    scheduler.teardown();

    assert!(!scheduler.is_armed());
    assert!(!scheduler.poll(t0 + Duration::from_secs(60)));
}
