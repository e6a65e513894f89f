//! Terminal rendering for the selection screen, workout cards and timer.

use fitness_core::{
    AbsLimitRule, Catalog, ExerciseStatus, Routine, RoutineKind, SessionSummary, TimerEvent, WorkoutSession,
};

const BAR_WIDTH: usize = 20;

fn bar(percent: f64) -> String {
    let filled = ((percent.clamp(0.0, 100.0) / 100.0) * BAR_WIDTH as f64).round() as usize;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(BAR_WIDTH - filled))
}

fn routine_label(kind: RoutineKind) -> &'static str {
    match kind {
        RoutineKind::Upper => "Upper Body",
        RoutineKind::Lower => "Lower Body",
    }
}

pub fn print_selection(catalog: &Catalog) {
    println!();
    println!("Fitness Tracker");
    println!("Choose your workout routine and start tracking your progress");
    println!();
    for (idx, routine) in catalog.routines.iter().enumerate() {
        println!(
            "  {}) {:<11} {}",
            idx + 1,
            routine_label(routine.kind),
            routine.focus
        );
        println!("     {}", routine_stats(routine));
    }
    println!();
    println!("Type a number or name to start, 'quit' to exit.");
}

pub fn routine_stats(routine: &Routine) -> String {
    format!(
        "{} exercises • {} total sets",
        routine.exercises.len(),
        routine.total_sets()
    )
}

/// List a routine; `abs_rule` decides the `[abs]` tags, falling back to the catalog
pub fn print_routine(routine: &Routine, abs_rule: Option<&AbsLimitRule>) {
    println!("{} ({})", routine.title, routine.focus);
    println!("{}", routine_stats(routine));
    println!();
    for (idx, exercise) in routine.exercises.iter().enumerate() {
        let mut tags = Vec::new();
        let abs = abs_rule.map_or_else(|| exercise.is_abs(), |rule| rule.is_member(&exercise.name));
        if abs {
            tags.push("abs");
        }
        if exercise.optional {
            tags.push("optional");
        }
        let tags = if tags.is_empty() {
            String::new()
        } else {
            format!("  [{}]", tags.join(", "))
        };
        println!(
            "{:>3}. {:<30} {} sets × {} reps{}",
            idx + 1,
            exercise.name,
            exercise.set_count,
            exercise.rep_target,
            tags
        );
    }
    if let Some(url) = &routine.tutorial_url {
        println!();
        println!("  ℹ Tutorial: {}", url);
    }
}

pub fn print_warm_up(routine: &Routine) {
    if routine.warm_up.is_empty() {
        println!("No warm-up routine for {}.", routine.title);
        return;
    }

    println!("{} Warm-Up Routine", routine.title);
    for section in &routine.warm_up {
        println!();
        println!("{}:", section.title);
        for drill in &section.drills {
            println!("  • {}: {}", drill.name, drill.instruction);
        }
    }
}

fn print_card(idx: usize, status: &ExerciseStatus, lock_banner: Option<&str>) {
    let boxes: String = status
        .sets
        .iter()
        .enumerate()
        .map(|(set, done)| {
            if *done {
                "[✓]".to_string()
            } else if status.locked {
                "[ ]".to_string()
            } else {
                format!("[{}]", set + 1)
            }
        })
        .collect();

    println!(
        "{:>3}. {:<30} {} sets × {} reps  {}  {}/{} sets",
        idx + 1,
        status.name,
        status.set_count,
        status.rep_target,
        boxes,
        status.completed_sets,
        status.set_count
    );
    if status.locked {
        if let Some(banner) = lock_banner {
            println!("       locked: {} - limit reached", banner);
        }
    }
}

/// Render the whole workout screen; this is the first render for any
/// exercise not seen yet, so ledger entries get created here.
pub fn print_workout(session: &mut WorkoutSession) {
    let cards = session.render_all();
    let progress = session.progress_percentage(&fitness_core::ProgressScope::All);
    let banner = session.abs_rule().map(|rule| rule.describe());
    let routine = session.routine();

    println!();
    println!("{}", routine.title);
    println!("{}", routine.focus);
    println!("Progress: {}% {}", progress, bar(f64::from(progress)));
    println!();
    for (idx, status) in cards.iter().enumerate() {
        print_card(idx, status, banner.as_deref());
    }
    print_timer(session);
}

pub fn print_progress(session: &WorkoutSession) {
    let progress = session.progress_percentage(&fitness_core::ProgressScope::All);
    println!("Progress: {}% {}", progress, bar(f64::from(progress)));
}

pub fn print_timer(session: &WorkoutSession) {
    let timer = session.timer();
    if !timer.is_active() {
        return;
    }
    let detail = if timer.remaining_seconds() > 0 {
        format!("{} seconds", timer.remaining_seconds())
    } else {
        "Complete!".to_string()
    };
    println!(
        "⏱ Rest Timer {}  {}  Rest time: {}",
        timer.display(),
        bar(timer.progress_percent()),
        detail
    );
}

pub fn print_timer_event(event: TimerEvent, session: &WorkoutSession) {
    match event {
        TimerEvent::Armed { .. } => {
            println!("⏱ Rest timer started: {}", session.timer().display())
        }
        TimerEvent::Alert => println!("\x07🔔 Timer Complete! (Closing...)"),
        TimerEvent::Closed => println!("Rest timer closed."),
        TimerEvent::Dismissed => println!("Rest timer dismissed."),
    }
}

/// Countdown line printed on the clock's schedule: every ten seconds and
/// for the last three.
pub fn print_countdown(session: &WorkoutSession) {
    let remaining = session.timer().remaining_seconds();
    if remaining > 0 && (remaining % 10 == 0 || remaining <= 3) {
        println!("⏱ {}", session.timer().display());
    }
}

pub fn print_summary(summary: &SessionSummary) {
    let minutes = summary.elapsed.num_minutes();
    let seconds = summary.elapsed.num_seconds() % 60;
    println!(
        "Workout ended: {} {}% ({}/{} sets) in {}m{:02}s",
        routine_label(summary.routine),
        summary.progress,
        summary.completed_sets,
        summary.total_sets,
        minutes,
        seconds
    );
}

pub fn print_help(on_selection: bool) {
    if on_selection {
        println!("Commands: 1|upper, 2|lower, quit");
        return;
    }
    println!("Commands:");
    println!("  <exercise#> <set#>   toggle a set (also: toggle|t <exercise#> <set#>)");
    println!("  rest                 start the long rest countdown");
    println!("  dismiss              close the rest timer");
    println!("  wait <secs>          advance the rest timer by <secs> seconds");
    println!("  reset                uncheck every set");
    println!("  status               redraw the workout");
    println!("  json                 print the session as JSON");
    println!("  warmup               show the warm-up routine");
    println!("  tutorial             show the tutorial link");
    println!("  back                 end the workout and return to selection");
    println!("  quit                 exit");
}
