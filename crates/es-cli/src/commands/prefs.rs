use es_core::preferences::{NavigationPreferences, PreferencesUpdate};

use super::{print_json, Context};

fn render(prefs: &NavigationPreferences) {
    println!("sidebar collapsed:       {}", prefs.sidebar_collapsed);
    println!("show tooltips:           {}", prefs.show_tooltips);
    println!("show disabled features:  {}", prefs.show_disabled_features);
    println!("preferred view:          {:?}", prefs.preferred_view);
    println!("completed onboarding:    {}", prefs.completed_onboarding);
}

pub fn show(ctx: &Context, json_output: bool) -> anyhow::Result<()> {
    let prefs = ctx.preferences().load();
    if json_output {
        return print_json(&prefs);
    }
    render(&prefs);
    Ok(())
}

pub fn set(ctx: &Context, update: &PreferencesUpdate) -> anyhow::Result<()> {
    if *update == PreferencesUpdate::default() {
        anyhow::bail!("nothing to change (pass at least one preference flag)");
    }
    let prefs = ctx.preferences().save(update);
    render(&prefs);
    Ok(())
}

pub fn reset(ctx: &Context) {
    ctx.preferences().reset();
    println!("Preferences restored to defaults.");
}
