//! `families` command: list the family taxonomy.

use clap::Args;
use serde::Serialize;

use crate::cli::common::{print_json, CliResult};
use crate::models::MainFamily;

/// List main families and their sub-families
#[derive(Args, Debug)]
pub struct FamiliesArgs {
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Serialize, Debug)]
struct FamilyOutput {
    family: &'static str,
    sub_families: &'static [&'static str],
}

impl FamiliesArgs {
    /// Execute families command
    pub fn execute(&self) -> CliResult<()> {
        let families: Vec<FamilyOutput> = MainFamily::ALL
            .iter()
            .map(|family| FamilyOutput {
                family: family.name(),
                sub_families: family.sub_families(),
            })
            .collect();

        if self.json {
            return print_json(&families);
        }

        for family in &families {
            println!("{}: {}", family.family, family.sub_families.join(", "));
        }
        Ok(())
    }
}
