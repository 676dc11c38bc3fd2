use platetour_game::{
    AnimationState, DriveRun, DriveStart, NormalizedPath, PathAnimation, PathCfg, Point,
};

#[allow(clippy::cast_precision_loss)]
fn wiggly_stroke() -> Vec<Point> {
    (0..=120)
        .map(|i| {
            let t = i as f32 / 10.0;
            Point::new(t * 20.0, (t * 1.3).sin() * 40.0)
        })
        .collect()
}

#[test]
#[allow(clippy::cast_precision_loss)]
fn pose_moves_continuously_with_fraction() {
    let path = NormalizedPath::from_points(&wiggly_stroke(), 0.5);
    let total = path.total_length();
    let steps = 1_000;
    let mut previous = path.position_at(0.0).unwrap().point;
    assert_eq!(previous, path.start().unwrap());
    for i in 1..=steps {
        let fraction = i as f32 / steps as f32;
        let point = path.position_at(fraction).unwrap().point;
        let moved = previous.distance(point);
        assert!(
            moved <= total / steps as f32 + 1e-2,
            "jump of {moved} at fraction {fraction}"
        );
        previous = point;
    }
    assert_eq!(previous, path.end().unwrap());
}

#[test]
fn degenerate_strokes_never_animate() {
    let dot = NormalizedPath::from_points(&[Point::new(4.0, 4.0)], 0.5);
    assert!(PathAnimation::start(dot, 3.0).is_none());

    let scribble = NormalizedPath::from_points(
        &[
            Point::new(4.0, 4.0),
            Point::new(4.2, 4.1),
            Point::new(4.1, 3.9),
        ],
        0.5,
    );
    assert!(PathAnimation::start(scribble, 3.0).is_none());

    let mut run = DriveRun::new(PathCfg::default());
    run.begin_stroke(Point::new(1.0, 1.0));
    assert_eq!(run.finish_stroke(), DriveStart::NoOp);
    assert!(run.tick(0.016).is_none());
}

#[test]
fn sixty_fps_drive_reaches_the_end_once() {
    let mut run = DriveRun::new(PathCfg::default());
    let stroke = wiggly_stroke();
    let end = *stroke.last().unwrap();
    run.set_destination(end);
    run.begin_stroke(stroke[0]);
    for p in &stroke[1..] {
        run.extend_stroke(*p);
    }
    assert_eq!(
        run.finish_stroke(),
        DriveStart::Started {
            reaches_destination: true
        }
    );

    let mut last_pct = 0;
    let mut finished_frames = 0;
    for _ in 0..400 {
        let frame = run.tick(1.0 / 60.0).unwrap();
        assert!(frame.progress_pct >= last_pct);
        last_pct = frame.progress_pct;
        if frame.state == AnimationState::Finished {
            finished_frames += 1;
            assert_eq!(frame.pose.point, end);
        }
    }
    assert_eq!(last_pct, 100);
    assert!(finished_frames > 0);
}
