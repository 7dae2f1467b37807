use es_core::environment::{config_for, environment_comparison, EnvironmentName, Feature};
use serde_json::json;

use super::{print_json, Context};

/// Print the active environment, its banner and enabled features.
pub fn show(ctx: &Context, json_output: bool) -> anyhow::Result<()> {
    let cfg = config_for(ctx.environment);

    if json_output {
        return print_json(&json!({
            "appName": ctx.config.general.app_name,
            "environment": cfg,
            "dataDir": ctx.data_dir(),
        }));
    }

    println!("{}  [{}]", ctx.config.general.app_name, cfg.display_name);
    println!("{}", "-".repeat(40));
    println!("Environment:  {}", cfg.name);
    println!(
        "Banner:       {} / {} / {}",
        cfg.banner.color, cfg.banner.background, cfg.banner.border_color
    );
    println!("Data dir:     {}", ctx.data_dir().display());
    println!("Features:");
    for feature in Feature::ALL {
        let on = cfg.features.is_enabled(feature);
        println!("  {:<22} {}", feature.label(), if on { "on" } else { "off" });
    }
    Ok(())
}

pub fn flags(ctx: &Context, json_output: bool) -> anyhow::Result<()> {
    let flags = ctx.flags();
    if json_output {
        return print_json(&flags);
    }
    for feature in Feature::ALL {
        println!("{:<22} {}", feature.label(), flags.is_enabled(feature));
    }
    Ok(())
}

/// Print the feature matrix across every environment.
pub fn compare(json_output: bool) -> anyhow::Result<()> {
    let rows = environment_comparison();
    if json_output {
        return print_json(&rows);
    }

    print!("{:<22}", "Feature");
    for env in EnvironmentName::ALL {
        print!(" {:>6}", env.as_str());
    }
    println!();
    println!("{}", "-".repeat(22 + 7 * EnvironmentName::ALL.len()));
    for row in rows {
        print!("{:<22}", row.label);
        for (_, on) in row.values {
            print!(" {:>6}", if on { "yes" } else { "-" });
        }
        println!();
    }
    Ok(())
}
