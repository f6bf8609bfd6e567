//! `wander steps`: show the wizard flow.

use anyhow::Result;

use wander_core::draft::{ActivityLevel, BudgetTier, TravelerCategory};
use wander_core::wizard::{BackTarget, ScreenFlow, WizardStep};

/// Print every step with its position, or details for one step.
///
/// An unknown `at` step is a [`wander_core::wizard::FlowError`] and fails
/// the command.
pub fn run_steps(at: Option<&str>) -> Result<()> {
    let flow = ScreenFlow::standard();

    let Some(step) = at else {
        for name in flow.steps() {
            let position = flow.position(name)?;
            let title = name
                .parse::<WizardStep>()
                .map(|s| s.title())
                .unwrap_or_default();
            println!("{:>2}. {:<13} {title}", position.index, name);
        }
        return Ok(());
    };

    let position = flow.position(step)?;
    println!("{step}: {position}");
    match flow.previous(step)? {
        BackTarget::Step(prev) => println!("  back: {prev}"),
        BackTarget::ExitToTripList => println!("  back: exit to trip list"),
    }
    match flow.next(step)? {
        Some(next) => println!("  next: {next}"),
        None => println!("  next: (end of wizard)"),
    }
    print_choices(step);
    Ok(())
}

/// List the fixed choices a step offers, if any.
fn print_choices(step: &str) {
    match step.parse::<WizardStep>() {
        Ok(WizardStep::WhosGoing) => {
            println!("  travelers:");
            for c in TravelerCategory::ALL {
                println!("    {:<9} {}", c.to_string(), c.description());
            }
        }
        Ok(WizardStep::MoreInfo) => {
            println!("  budget:");
            for b in BudgetTier::ALL {
                println!("    {:<9} {}", b.to_string(), b.description());
            }
            println!("  activity:");
            for a in ActivityLevel::ALL {
                println!("    {:<9} {}", a.to_string(), a.description());
            }
        }
        _ => {}
    }
}
