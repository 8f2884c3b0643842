use chrono::{DateTime, TimeZone, Utc};
use serde_json::json;
use turn_timeline::{
    ColorCategory, DateRange, FixedClock, LayoutOptions, ProjectTimeline, TaskSchedule,
    TimelineLayout,
};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 7, 4, 15, 30, 0).unwrap()
}

fn clock() -> FixedClock {
    FixedClock(now())
}

fn timeline(value: serde_json::Value) -> ProjectTimeline {
    serde_json::from_value(value).unwrap()
}

#[test]
fn normalize_is_total_over_malformed_dates() {
    let starts = [None, Some(""), Some("garbage"), Some("2024-01-01"), Some("2024-02-30")];
    let ends = [None, Some(""), Some("nope"), Some("2023-12-01"), Some("2024-03-01")];
    let durations = [None, Some(0.0), Some(-4.0), Some(2.5), Some(f64::NAN)];

    for start in starts {
        for end in ends {
            for days in durations {
                let t = ProjectTimeline {
                    project_start_date: start.map(String::from),
                    project_end_date: end.map(String::from),
                    total_duration_days: days,
                    ..Default::default()
                };
                let range = DateRange::normalize(&t, now());
                assert!(range.total_days >= 1, "{start:?} {end:?} {days:?}");
                assert!(range.start <= range.end, "{start:?} {end:?} {days:?}");
            }
        }
    }
}

#[test]
fn positions_are_clamped_to_exact_bounds() {
    let t = timeline(json!({
        "project_start_date": "2024-01-01",
        "total_duration_days": 10,
        "tasks": [
            { "task_id": "early", "start_date": "2023-01-01", "duration_days": 1 },
            { "task_id": "late", "start_date": "2030-01-01", "duration_days": 500 },
            { "task_id": "tiny", "start_date": "2024-01-05", "duration_days": 0.05 },
            { "task_id": "negative", "start_date": "2024-01-05", "duration_days": -2 }
        ]
    }));
    let layout = TimelineLayout::compute(&t, &clock()).unwrap();

    let early = layout.task("early").unwrap();
    assert_eq!(early.left_pct, 0.0);
    assert_eq!(early.width_pct, 10.0);

    let late = layout.task("late").unwrap();
    assert_eq!(late.left_pct, 100.0);
    assert_eq!(late.width_pct, 100.0);

    assert_eq!(layout.task("tiny").unwrap().width_pct, 2.0);
    assert_eq!(layout.task("negative").unwrap().width_pct, 2.0);

    for task in &layout.tasks {
        assert!((0.0..=100.0).contains(&task.left_pct));
        assert!((0.0..=100.0).contains(&task.width_pct));
    }
}

#[test]
fn identical_input_gives_identical_output() {
    let value = json!({
        "critical_path": ["A"],
        "slack_days": { "B": 0.5 },
        "tasks": [
            { "task_id": "A", "status": "blocked", "start_date": "2024-07-05", "duration_days": 3 },
            { "task_id": "B", "status": "Completed", "duration_days": 1 }
        ]
    });
    let first = TimelineLayout::compute(&timeline(value.clone()), &clock()).unwrap();
    let second = TimelineLayout::compute(&timeline(value), &clock()).unwrap();
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn task_order_is_preserved() {
    assert!(TimelineLayout::compute(&ProjectTimeline::default(), &clock()).is_none());

    for n in [1usize, 10, 1000] {
        let tasks: Vec<TaskSchedule> = (0..n)
            .rev()
            .map(|i| TaskSchedule {
                start_date: Some(format!("2024-01-{:02}", i % 28 + 1)),
                duration_days: (i % 5) as f64,
                ..TaskSchedule::new(format!("T{i}"), format!("Task {i}"))
            })
            .collect();
        let expected: Vec<String> = tasks.iter().map(|t| t.task_id.clone()).collect();
        let t = ProjectTimeline {
            project_start_date: Some("2024-01-01".into()),
            total_duration_days: Some(30.0),
            tasks,
            ..Default::default()
        };

        let layout = TimelineLayout::compute(&t, &clock()).unwrap();
        let actual: Vec<String> = layout.tasks.iter().map(|t| t.task_id.clone()).collect();
        assert_eq!(actual, expected);
    }
}

#[test]
fn unknown_ids_are_not_critical_and_have_no_slack() {
    let t = timeline(json!({
        "critical_path": ["T1"],
        "slack_days": { "T1": 4.0 },
        "tasks": [{ "task_id": "T9", "task_name": "Orphan" }]
    }));
    let layout = TimelineLayout::compute(&t, &clock()).unwrap();
    let task = layout.task("T9").unwrap();
    assert!(!task.is_critical);
    assert_eq!(task.slack_days, 0.0);
}

#[test]
fn end_to_end_example() {
    let t = timeline(json!({
        "project_start_date": "2024-01-01",
        "total_duration_days": 10,
        "tasks": [{
            "task_id": "T1",
            "start_date": "2024-01-03",
            "duration_days": 2,
            "status": "in_progress",
            "completion_percentage": 50,
            "task_name": "Design"
        }]
    }));
    let layout = TimelineLayout::compute(&t, &clock()).unwrap();

    assert_eq!(layout.range.start, Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
    assert_eq!(layout.range.end, Utc.with_ymd_and_hms(2024, 1, 11, 0, 0, 0).unwrap());
    assert_eq!(layout.range.total_days, 10);

    let t1 = &layout.tasks[0];
    assert_eq!(t1.left_pct, 20.0);
    assert_eq!(t1.width_pct, 20.0);
    assert_eq!(t1.color_category, ColorCategory::Active);
    assert_eq!(t1.completion_pct, 50.0);
    assert_eq!(layout.summary(), "10 days • 1 tasks");
}

#[test]
fn degenerate_example_without_any_dates() {
    let t = timeline(json!({
        "tasks": [{
            "task_id": "T2",
            "duration_days": 1,
            "status": "blocked",
            "completion_percentage": 0,
            "task_name": "Blocked"
        }]
    }));
    let layout = TimelineLayout::compute(&t, &clock()).unwrap();

    assert_eq!(layout.range.start, now());
    assert_eq!(layout.range.end, now());
    assert_eq!(layout.range.total_days, 1);

    let t2 = &layout.tasks[0];
    assert_eq!(t2.left_pct, 0.0);
    assert_eq!(t2.width_pct, 0.0);
    assert_eq!(t2.color_category, ColorCategory::Blocked);
}

#[test]
fn display_floor_is_tunable() {
    let t = timeline(json!({
        "project_start_date": "2024-01-01",
        "total_duration_days": 100,
        "tasks": [{ "task_id": "T1", "start_date": "2024-01-01", "duration_days": 1 }]
    }));
    let no_floor = LayoutOptions {
        min_bar_width_pct: 0.0,
        ..Default::default()
    };
    let layout = TimelineLayout::compute_with(&t, &clock(), &no_floor).unwrap();
    assert_eq!(layout.tasks[0].width_pct, 1.0);

    let layout = TimelineLayout::compute(&t, &clock()).unwrap();
    assert_eq!(layout.tasks[0].width_pct, 2.0);
}

#[test]
fn zero_floor_keeps_dated_and_undated_tasks_apart() {
    let t = timeline(json!({
        "project_start_date": "2024-01-01",
        "total_duration_days": 10,
        "tasks": [
            { "task_id": "dated", "start_date": "2024-01-01", "duration_days": 0 },
            { "task_id": "undated", "duration_days": 0 }
        ]
    }));
    let no_floor = LayoutOptions {
        min_bar_width_pct: 0.0,
        ..Default::default()
    };
    let layout = TimelineLayout::compute_with(&t, &clock(), &no_floor).unwrap();

    let dated = layout.task("dated").unwrap();
    let undated = layout.task("undated").unwrap();
    assert_eq!((dated.left_pct, dated.width_pct), (0.0, 0.0));
    assert_eq!((undated.left_pct, undated.width_pct), (0.0, 0.0));
    assert!(dated.has_start);
    assert!(!undated.has_start);
}
