use std::path::Path;

use anyhow::Context as _;
use es_core::tutorial::{all_tutorials, tutorial_by_id, StepOutcome, Tutorial};
use serde_json::json;

use super::{print_json, write_artifact, Context};

fn find(id: &str) -> anyhow::Result<&'static Tutorial> {
    tutorial_by_id(id).with_context(|| format!("Tutorial not found: {id}"))
}

fn require_started(ctx: &Context, tutorial: &Tutorial) -> anyhow::Result<()> {
    if ctx.tracker().progress_for(tutorial.id).is_none() {
        anyhow::bail!(
            "Tutorial {} has not been started (run `es tutorial start {}`)",
            tutorial.id,
            tutorial.id
        );
    }
    Ok(())
}

pub fn list(ctx: &Context, json_output: bool) -> anyhow::Result<()> {
    let tracker = ctx.tracker();

    if json_output {
        let payload: Vec<_> = all_tutorials()
            .iter()
            .map(|t| {
                json!({
                    "id": t.id,
                    "title": t.title,
                    "category": t.category,
                    "difficulty": t.difficulty,
                    "estimatedTime": t.estimated_time,
                    "steps": t.steps.len(),
                    "completionPercentage": tracker.completion_percentage(t),
                })
            })
            .collect();
        return print_json(&payload);
    }

    for t in all_tutorials() {
        println!(
            "{} {:<22} {:<12} {:>3} min  {:>3}%",
            t.category.icon(),
            t.id,
            t.difficulty.as_str(),
            t.estimated_time,
            tracker.completion_percentage(t)
        );
        println!("    {}", t.title);
    }
    Ok(())
}

pub fn show(ctx: &Context, id: &str) -> anyhow::Result<()> {
    let tutorial = find(id)?;
    let progress = ctx.tracker().progress_for(tutorial.id);

    println!("{}  ({})", tutorial.title, tutorial.id);
    println!("{}", tutorial.description);
    println!(
        "{} / {} / {} min / tags: {}",
        tutorial.category.as_str(),
        tutorial.difficulty.as_str(),
        tutorial.estimated_time,
        tutorial.tags.join(", ")
    );
    println!("{}", "-".repeat(40));

    for (index, step) in tutorial.steps.iter().enumerate() {
        let done = progress
            .as_ref()
            .is_some_and(|p| p.has_completed_step(step.id));
        let current = progress
            .as_ref()
            .is_some_and(|p| p.current_step_index == index);
        println!(
            "{} {} {:>2}. {} ({})",
            if current { ">" } else { " " },
            if done { "[x]" } else { "[ ]" },
            index + 1,
            step.title,
            step.id
        );
    }

    if let Some(step) = progress
        .as_ref()
        .and_then(|p| tutorial.steps.get(p.current_step_index))
    {
        println!();
        println!("{}", step.content);
        for command in step.commands {
            let scope = command
                .environment
                .map(|e| format!(" [{e}]"))
                .unwrap_or_default();
            println!("  $ {}{}  # {}", command.command, scope, command.description);
        }
        for tip in step.tips {
            println!("  tip: {tip}");
        }
    }
    Ok(())
}

pub fn start(ctx: &Context, id: &str) -> anyhow::Result<()> {
    let tutorial = find(id)?;
    ctx.tracker().start(tutorial.id);
    println!("Started {}", tutorial.title);
    Ok(())
}

pub fn goto(ctx: &Context, id: &str, index: usize) -> anyhow::Result<()> {
    let tutorial = find(id)?;
    require_started(ctx, tutorial)?;
    if index >= tutorial.steps.len() {
        anyhow::bail!(
            "Step index {index} out of range (tutorial has {} steps)",
            tutorial.steps.len()
        );
    }
    ctx.tracker().set_current_step(tutorial.id, index);
    println!("Now on step {}: {}", index + 1, tutorial.steps[index].title);
    Ok(())
}

pub fn next(ctx: &Context, id: &str) -> anyhow::Result<()> {
    let tutorial = find(id)?;
    require_started(ctx, tutorial)?;
    if let Some((index, step)) = ctx
        .tracker()
        .next_step(tutorial)
        .and_then(|i| tutorial.steps.get(i).map(|s| (i, s)))
    {
        println!("Now on step {}: {}", index + 1, step.title);
    }
    Ok(())
}

pub fn prev(ctx: &Context, id: &str) -> anyhow::Result<()> {
    let tutorial = find(id)?;
    require_started(ctx, tutorial)?;
    if let Some((index, step)) = ctx
        .tracker()
        .previous_step(tutorial)
        .and_then(|i| tutorial.steps.get(i).map(|s| (i, s)))
    {
        println!("Now on step {}: {}", index + 1, step.title);
    }
    Ok(())
}

pub fn step(ctx: &Context, id: &str, step_id: &str) -> anyhow::Result<()> {
    let tutorial = find(id)?;
    if tutorial.step_index(step_id).is_none() {
        anyhow::bail!("Step {step_id} not found in tutorial {}", tutorial.id);
    }
    let tracker = ctx.tracker();
    match tracker.record_step(tutorial, step_id) {
        StepOutcome::NotStarted => {
            anyhow::bail!("Tutorial {} has not been started", tutorial.id)
        }
        StepOutcome::AlreadyCompleted => println!("Step {step_id} was already completed"),
        StepOutcome::StepCompleted => println!(
            "Completed {step_id} ({}%)",
            tracker.completion_percentage(tutorial)
        ),
        StepOutcome::TutorialCompleted => println!("Tutorial {} completed!", tutorial.title),
    }
    Ok(())
}

pub fn complete(ctx: &Context, id: &str) -> anyhow::Result<()> {
    let tutorial = find(id)?;
    if !ctx.tracker().complete_tutorial(tutorial.id) {
        anyhow::bail!("Tutorial {} has not been started", tutorial.id);
    }
    println!("Tutorial {} completed!", tutorial.title);
    Ok(())
}

pub fn progress(ctx: &Context, id: Option<&str>, json_output: bool) -> anyhow::Result<()> {
    let tracker = ctx.tracker();

    let Some(id) = id else {
        let overall = tracker.overall_progress();
        if json_output {
            return print_json(&overall);
        }
        println!("Completed:    {}", overall.completed_tutorials.join(", "));
        println!("In progress:  {}", overall.active_tutorials().join(", "));
        println!("Last active:  {}", overall.last_activity_at.to_rfc3339());
        return Ok(());
    };

    let tutorial = find(id)?;
    let record = tracker.progress_for(tutorial.id);
    let percentage = tracker.completion_percentage(tutorial);
    if json_output {
        return print_json(&json!({
            "progress": record,
            "completionPercentage": percentage,
        }));
    }
    match record {
        None => println!("{}: not started", tutorial.id),
        Some(p) => {
            println!("{}: {percentage}%", tutorial.id);
            println!(
                "  step {} of {}, {} completed",
                p.current_step_index + 1,
                tutorial.steps.len(),
                p.completed_steps.len()
            );
            println!("  started {}", p.started_at.to_rfc3339());
            if let Some(at) = p.completed_at {
                println!("  completed {}", at.to_rfc3339());
            }
        }
    }
    Ok(())
}

pub fn export(ctx: &Context, out: Option<&Path>) -> anyhow::Result<()> {
    let document = ctx.tracker().export_all();
    match out {
        Some(path) => {
            write_artifact(path, &document)?;
            println!("Exported progress to {}", path.display());
        }
        None => println!("{document}"),
    }
    Ok(())
}

pub fn import(ctx: &Context, file: &Path) -> anyhow::Result<()> {
    let data = std::fs::read_to_string(file)
        .with_context(|| format!("failed to read {}", file.display()))?;
    if !ctx.tracker().import_all(&data) {
        anyhow::bail!("Could not import progress from {}", file.display());
    }
    println!("Imported progress from {}", file.display());
    Ok(())
}

pub fn reset(ctx: &Context) {
    ctx.tracker().reset_all();
    println!("All tutorial progress deleted.");
}

#[cfg(test)]
mod tests {
    use es_core::environment::EnvironmentName;

    use super::*;
    use crate::commands::test_support::context;

    #[test]
    fn unknown_tutorial_is_an_error() {
        let (ctx, _dir) = context(EnvironmentName::Local);
        let err = start(&ctx, "rust-basics").unwrap_err();
        assert_eq!(err.to_string(), "Tutorial not found: rust-basics");
    }

    #[test]
    fn navigation_requires_start_and_valid_index() {
        let (ctx, _dir) = context(EnvironmentName::Local);
        assert!(next(&ctx, "git-workflow").is_err());

        start(&ctx, "git-workflow").unwrap();
        assert!(goto(&ctx, "git-workflow", 7).is_err());
        goto(&ctx, "git-workflow", 6).unwrap();
        next(&ctx, "git-workflow").unwrap();
        assert_eq!(
            ctx.tracker().progress_for("git-workflow").unwrap().current_step_index,
            6
        );
        prev(&ctx, "git-workflow").unwrap();
        assert_eq!(
            ctx.tracker().progress_for("git-workflow").unwrap().current_step_index,
            5
        );
    }

    #[test]
    fn prev_recovers_from_out_of_range_index() {
        let (ctx, _dir) = context(EnvironmentName::Local);
        start(&ctx, "git-workflow").unwrap();
        ctx.tracker().set_current_step("git-workflow", 50);

        prev(&ctx, "git-workflow").unwrap();
        assert_eq!(
            ctx.tracker().progress_for("git-workflow").unwrap().current_step_index,
            5
        );

        ctx.tracker().set_current_step("git-workflow", 50);
        next(&ctx, "git-workflow").unwrap();
        assert_eq!(
            ctx.tracker().progress_for("git-workflow").unwrap().current_step_index,
            6
        );
    }

    #[test]
    fn step_rejects_unknown_step_and_unstarted_tutorial() {
        let (ctx, _dir) = context(EnvironmentName::Local);
        assert!(step(&ctx, "git-workflow", "git-setup").is_err());
        start(&ctx, "git-workflow").unwrap();
        assert!(step(&ctx, "git-workflow", "nope").is_err());

        step(&ctx, "git-workflow", "git-setup").unwrap();
        step(&ctx, "git-workflow", "check-git-status").unwrap();
        assert_eq!(
            ctx.tracker()
                .completion_percentage(tutorial_by_id("git-workflow").unwrap()),
            29
        );
    }

    #[test]
    fn export_then_import_restores_progress() {
        let (ctx, dir) = context(EnvironmentName::Dev);
        start(&ctx, "environment-basics").unwrap();
        complete(&ctx, "environment-basics").unwrap();

        let file = dir.path().join("progress.json");
        export(&ctx, Some(&file)).unwrap();
        reset(&ctx);
        assert!(ctx.tracker().progress_for("environment-basics").is_none());

        import(&ctx, &file).unwrap();
        assert!(ctx
            .tracker()
            .overall_progress()
            .is_completed("environment-basics"));
    }

    #[test]
    fn import_rejects_malformed_file() {
        let (ctx, dir) = context(EnvironmentName::Dev);
        let file = dir.path().join("bad.json");
        std::fs::write(&file, "{ nope").unwrap();
        assert!(import(&ctx, &file).is_err());
        assert!(import(&ctx, &dir.path().join("missing.json")).is_err());
    }

    #[test]
    fn listing_commands_succeed() {
        let (ctx, _dir) = context(EnvironmentName::Local);
        start(&ctx, "deployment-pipeline").unwrap();
        assert!(list(&ctx, false).is_ok());
        assert!(list(&ctx, true).is_ok());
        assert!(show(&ctx, "deployment-pipeline").is_ok());
        assert!(progress(&ctx, None, false).is_ok());
        assert!(progress(&ctx, Some("deployment-pipeline"), true).is_ok());
        assert!(progress(&ctx, Some("git-workflow"), false).is_ok());
    }
}
