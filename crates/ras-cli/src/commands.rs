use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow, bail};
use tracing::{debug, info_span};

use ras_model::{LineDocument, ResourceId, ResourceKind, ResourceSlot};
use ras_project::{AllocationPolicy, CopyOptions, RasProject, Registry, find_project_file};
use ras_table::{
    CodecOptions, TableKind, TableSelector, extract_tables, scale_tables, scale_tables_in_document,
    write_comparison_csv,
};

use crate::cli::{
    ApplyArgs, ComputeArgs, CopyArgs, EntriesArgs, FindArgs, PolicyArg, ScaleArgs,
    SetCoresArgs, SetPrecomputeArgs, TablesArgs,
};
use crate::summary::{EntryRow, print_entries, print_scale_reports, print_tables};
use ras_cli::solver::{PlanExecutor, SolverCommand};

pub fn run_find(args: &FindArgs) -> Result<()> {
    match find_project_file(&args.folder)? {
        Some(path) => {
            println!("{}", path.display());
            Ok(())
        }
        None => bail!("no HEC-RAS project file in {}", args.folder.display()),
    }
}

pub fn run_entries(args: &EntriesArgs) -> Result<()> {
    let kind = args
        .kind
        .as_deref()
        .map(str::parse::<ResourceKind>)
        .transpose()?;
    let registry = Registry::open(&args.project);
    let document = registry.load()?;
    let rows: Vec<EntryRow> = document
        .references()
        .iter()
        .filter(|reference| kind.is_none_or(|kind| reference.kind == kind))
        .map(|reference| EntryRow {
            file_exists: reference
                .slot()
                .is_some_and(|slot| registry.project().resource_path(slot).is_file()),
            reference: reference.clone(),
        })
        .collect();
    print_entries(registry.project().name(), &rows);
    Ok(())
}

pub fn run_copy(args: &CopyArgs) -> Result<()> {
    let template: ResourceSlot = args.template.parse()?;
    let mut options = CopyOptions::new();
    if let Some(policy) = args.policy {
        options = options.with_policy(match policy {
            PolicyArg::GapFill => AllocationPolicy::GapFill,
            PolicyArg::Append => AllocationPolicy::Append,
        });
    }
    if let Some(label) = &args.label {
        options = options.with_label(label.clone());
    }
    let registry = Registry::open(&args.project);
    let span = info_span!("copy", project = %registry.project().name(), %template);
    let _guard = span.enter();
    let slot = match template.kind {
        ResourceKind::Plan => registry.copy_plan_from_template(template, &options)?,
        _ => registry.copy_resource_from_template(template, &options)?,
    };
    println!(
        "Created {slot} from {template}: {}",
        registry.project().resource_path(slot).display()
    );
    Ok(())
}

pub fn run_apply(args: &ApplyArgs, kind: ResourceKind) -> Result<()> {
    let registry = Registry::open(&args.project);
    let plan = resolve_plan(registry.project(), &args.plan);
    let id = ResourceId::parse_loose(&args.id)?;
    let rewritten = match kind {
        ResourceKind::Geometry => registry.apply_geometry_to_plan(&plan, id)?,
        ResourceKind::Unsteady => registry.apply_unsteady_to_plan(&plan, id)?,
        other => bail!("cannot apply a {other} to a plan"),
    };
    let slot = ResourceSlot::new(kind, id);
    if rewritten == 0 {
        println!("{} has no {kind} reference; nothing changed", plan.display());
    } else {
        println!("{} now uses {slot}", plan.display());
    }
    Ok(())
}

pub fn run_set_cores(args: &SetCoresArgs) -> Result<()> {
    ras_project::set_core_count(&args.plan, args.cores)?;
    println!("{}: cores set to {}", args.plan.display(), args.cores);
    Ok(())
}

pub fn run_set_precompute(args: &SetPrecomputeArgs) -> Result<()> {
    ras_project::set_precompute_flags(&args.plan, args.run_htab, args.use_ib_tables)?;
    println!(
        "{}: Run HTab={}, Use Existing IB Tables={}",
        args.plan.display(),
        args.run_htab,
        args.use_ib_tables
    );
    Ok(())
}

pub fn run_tables(args: &TablesArgs) -> Result<()> {
    let tables = extract_tables(&args.file)?;
    if args.json {
        let json = serde_json::to_string_pretty(&tables).context("serialize tables")?;
        println!("{json}");
    } else {
        print_tables(&tables);
    }
    Ok(())
}

pub fn run_scale(args: &ScaleArgs) -> Result<()> {
    let kind: TableKind = args.kind.parse().map_err(|message: String| anyhow!(message))?;
    let selector = match args.index {
        Some(index) => TableSelector::Index(index),
        None => TableSelector::All,
    };
    let reports = if args.dry_run {
        let mut document = LineDocument::read(&args.file)?;
        scale_tables_in_document(
            &mut document,
            kind,
            args.factor,
            selector,
            &CodecOptions::default(),
        )?
    } else {
        scale_tables(&args.file, kind, args.factor, selector)?
    };
    if let Some(path) = &args.compare_csv
        && let Some(report) = reports.first()
    {
        write_comparison_csv(path, &report.table)?;
        debug!(path = %path.display(), "wrote comparison csv");
    }
    print_scale_reports(&reports, !args.dry_run);
    Ok(())
}

pub fn run_compute(args: &ComputeArgs) -> Result<()> {
    let project = RasProject::new(&args.project);
    let plan = resolve_plan(&project, &args.plan);
    if !plan.is_file() {
        bail!("plan file not found: {}", plan.display());
    }
    let solver = SolverCommand::new(&args.exe);
    let outcome = solver.compute(project.project_file(), &plan)?;
    if !outcome.success {
        bail!(
            "solver exited with {}",
            outcome
                .exit_code
                .map_or_else(|| "a signal".to_string(), |code| format!("code {code}"))
        );
    }
    println!(
        "Computed {} in {:.1}s",
        plan.display(),
        outcome.elapsed.as_secs_f64()
    );
    Ok(())
}

/// Resolve a plan argument given as a path or as a plan number of the project.
fn resolve_plan(project: &RasProject, value: &str) -> PathBuf {
    let candidate = Path::new(value);
    if candidate.is_file() {
        return candidate.to_path_buf();
    }
    match ResourceSlot::parse_as(value, ResourceKind::Plan) {
        Ok(slot) => project.resource_path(slot),
        Err(_) => candidate.to_path_buf(),
    }
}
