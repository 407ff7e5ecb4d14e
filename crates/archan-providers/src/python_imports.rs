//! DSM built from the import statements of Python packages.
//!
//! Every `.py` file below the configured package directories becomes a
//! module entity (`shop/orders/views.py` is `shop.orders.views`, and
//! `__init__.py` stands for its package). Each `import` or `from ... import`
//! that resolves to one of those modules adds one dependency. Imports of
//! anything outside the scanned packages are ignored.

use archan_core::{
    ArgumentError, ArgumentSpec, Arguments, Data, DesignStructureMatrix, Provider,
    ProviderContext, ProviderError,
};
use indexmap::{IndexMap, IndexSet};
use rustpython_ast::{self as ast, Stmt};
use rustpython_parser::{parse, Mode, ParseError};
use std::path::{Path, PathBuf};

use crate::category::CategoryResolver;

const ARGUMENTS: &[ArgumentSpec] = &[
    ArgumentSpec::required("packages", "Package directories to scan, relative to the root"),
    ArgumentSpec::optional("depth", "Truncate module names to this many segments (0: no limit)"),
    ArgumentSpec::optional("categories", "Map of module prefix to category"),
    ArgumentSpec::optional(
        "default_category",
        "Category of modules matching no prefix (default: app_module)",
    ),
];

/// Scans Python packages and counts imports between their modules.
#[derive(Debug, Default, Clone, Copy)]
pub struct PythonImports;

impl PythonImports {
    /// Creates the provider.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Provider for PythonImports {
    fn identifier(&self) -> &'static str {
        "archan.PythonImports"
    }

    fn name(&self) -> &'static str {
        "Python Imports"
    }

    fn description(&self) -> &'static str {
        "Build a DSM from the import statements of Python packages"
    }

    fn arguments(&self) -> &'static [ArgumentSpec] {
        ARGUMENTS
    }

    fn get_data(&self, ctx: &ProviderContext, args: &Arguments) -> Result<Data, ProviderError> {
        let packages = args.get_str_array("packages");
        if packages.is_empty() {
            return Err(ArgumentError::Missing("packages".to_string()).into());
        }
        let depth = usize::try_from(args.get_u64("depth", 0))
            .map_err(|e| ArgumentError::invalid("depth", e.to_string()))?;
        let resolver = CategoryResolver::from_arguments(args)?;

        let mut modules = Vec::new();
        for (root, package) in packages.iter().enumerate() {
            modules.extend(scan_package(&ctx.resolve(package), root)?);
        }
        tracing::debug!("Found {} Python modules", modules.len());

        Ok(build_dsm(&modules, depth, &resolver)?.into())
    }
}

/// One Python source file.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Module {
    name: String,
    is_package: bool,
    path: PathBuf,
    /// Package-directory index, for entity ordering.
    root: usize,
}

impl Module {
    /// Package that relative imports in this module start from.
    fn current_package(&self) -> &str {
        if self.is_package {
            &self.name
        } else {
            self.name.rsplit_once('.').map_or("", |(parent, _)| parent)
        }
    }
}

fn walk_error(path: &Path, e: ignore::Error) -> ProviderError {
    ProviderError::Io {
        path: path.to_path_buf(),
        source: std::io::Error::other(e),
    }
}

fn scan_package(dir: &Path, root: usize) -> Result<Vec<Module>, ProviderError> {
    if !dir.is_dir() {
        return Err(ProviderError::Io {
            path: dir.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not a package directory"),
        });
    }
    let base = dir.parent().unwrap_or(dir);

    let mut modules = Vec::new();
    for entry in ignore::WalkBuilder::new(dir).build() {
        let entry = entry.map_err(|e| walk_error(dir, e))?;
        let path = entry.path();
        if !path.is_file() || path.extension().and_then(|ext| ext.to_str()) != Some("py") {
            continue;
        }
        let Ok(relative) = path.strip_prefix(base) else {
            continue;
        };

        let mut parts: Vec<String> = relative
            .with_extension("")
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();
        let is_package = parts.last().is_some_and(|p| p == "__init__");
        if is_package {
            parts.pop();
        }
        modules.push(Module {
            name: parts.join("."),
            is_package,
            path: path.to_path_buf(),
            root,
        });
    }
    Ok(modules)
}

/// Collects the import statements of a module, nested blocks included.
struct ImportVisitor<'a> {
    module: &'a Module,
    /// Candidate dotted names, one entry per imported name.
    targets: Vec<Vec<String>>,
}

impl<'a> ImportVisitor<'a> {
    fn new(module: &'a Module) -> Self {
        Self {
            module,
            targets: Vec::new(),
        }
    }

    fn visit_body(&mut self, body: &[Stmt]) {
        for stmt in body {
            self.visit_stmt(stmt);
        }
    }

    fn visit_handlers(&mut self, handlers: &[ast::ExceptHandler]) {
        for handler in handlers {
            let ast::ExceptHandler::ExceptHandler(handler) = handler;
            self.visit_body(&handler.body);
        }
    }

    fn visit_stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Import(node) => {
                for alias in &node.names {
                    self.targets.push(vec![alias.name.to_string()]);
                }
            }
            Stmt::ImportFrom(node) => {
                let level = node.level.map_or(0, |level| level.to_usize());
                let name = node.module.as_ref().map_or("", |m| m.as_str());
                let Some(base) = absolute_base(self.module, level, name) else {
                    return;
                };
                for alias in &node.names {
                    let mut candidates = Vec::new();
                    if alias.name.as_str() != "*" {
                        candidates.push(join(&base, alias.name.as_str()));
                    }
                    if !base.is_empty() {
                        candidates.push(base.clone());
                    }
                    self.targets.push(candidates);
                }
            }
            Stmt::FunctionDef(node) => self.visit_body(&node.body),
            Stmt::AsyncFunctionDef(node) => self.visit_body(&node.body),
            Stmt::ClassDef(node) => self.visit_body(&node.body),
            Stmt::If(node) => {
                self.visit_body(&node.body);
                self.visit_body(&node.orelse);
            }
            Stmt::For(node) => {
                self.visit_body(&node.body);
                self.visit_body(&node.orelse);
            }
            Stmt::AsyncFor(node) => {
                self.visit_body(&node.body);
                self.visit_body(&node.orelse);
            }
            Stmt::While(node) => {
                self.visit_body(&node.body);
                self.visit_body(&node.orelse);
            }
            Stmt::With(node) => self.visit_body(&node.body),
            Stmt::AsyncWith(node) => self.visit_body(&node.body),
            Stmt::Try(node) => {
                self.visit_body(&node.body);
                self.visit_handlers(&node.handlers);
                self.visit_body(&node.orelse);
                self.visit_body(&node.finalbody);
            }
            Stmt::TryStar(node) => {
                self.visit_body(&node.body);
                self.visit_handlers(&node.handlers);
                self.visit_body(&node.orelse);
                self.visit_body(&node.finalbody);
            }
            Stmt::Match(node) => {
                for case in &node.cases {
                    self.visit_body(&case.body);
                }
            }
            _ => {}
        }
    }
}

/// Returns the dotted names each import statement of `module` refers to.
///
/// For `from X import Y` both `X.Y` and `X` are candidates, in that order.
fn import_targets(module: &Module, source: &str) -> Result<Vec<Vec<String>>, ParseError> {
    let path = module.path.to_string_lossy();
    let mut visitor = ImportVisitor::new(module);
    if let ast::Mod::Module(parsed) = parse(source, Mode::Module, &path)? {
        visitor.visit_body(&parsed.body);
    }
    Ok(visitor.targets)
}

/// Reads a source file. Bytes that are not UTF-8 (Python 2 sources with a
/// `coding` header) are replaced.
fn read_source(path: &Path) -> Result<String, ProviderError> {
    let bytes = std::fs::read(path).map_err(|e| ProviderError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn join(base: &str, name: &str) -> String {
    match (base.is_empty(), name.is_empty()) {
        (true, _) => name.to_string(),
        (_, true) => base.to_string(),
        _ => format!("{base}.{name}"),
    }
}

/// Resolves the module part of a `from` import. Returns `None` when a
/// relative import climbs above the top-level package.
fn absolute_base(module: &Module, level: usize, name: &str) -> Option<String> {
    if level == 0 {
        return Some(name.to_string());
    }
    let mut package: Vec<&str> = module.current_package().split('.').collect();
    for _ in 1..level {
        package.pop()?;
    }
    if package.is_empty() || package == [""] {
        return None;
    }
    Some(join(&package.join("."), name))
}

/// Longest known module that `target` names or lives in.
fn resolve_target<'a>(target: &str, known: &'a IndexSet<String>) -> Option<&'a str> {
    let mut candidate = target;
    loop {
        if let Some(found) = known.get(candidate) {
            return Some(found.as_str());
        }
        candidate = candidate.rsplit_once('.')?.0;
    }
}

fn truncate(name: &str, depth: usize) -> String {
    if depth == 0 {
        return name.to_string();
    }
    name.split('.').take(depth).collect::<Vec<_>>().join(".")
}

fn build_dsm(
    modules: &[Module],
    depth: usize,
    resolver: &CategoryResolver,
) -> Result<DesignStructureMatrix, ProviderError> {
    let known: IndexSet<String> = modules.iter().map(|m| m.name.clone()).collect();

    // Entities: package roots in configured order, sorted inside each.
    let mut by_root: IndexMap<usize, Vec<String>> = IndexMap::new();
    for module in modules {
        by_root
            .entry(module.root)
            .or_default()
            .push(truncate(&module.name, depth));
    }
    let mut entities: IndexSet<String> = IndexSet::new();
    for names in by_root.values_mut() {
        names.sort();
        entities.extend(names.drain(..));
    }

    let size = entities.len();
    let mut data = vec![vec![0u32; size]; size];
    for module in modules {
        let Some(row) = entities.get_index_of(&truncate(&module.name, depth)) else {
            continue;
        };
        let source = read_source(&module.path)?;
        let targets = match import_targets(module, &source) {
            Ok(targets) => targets,
            Err(e) => {
                tracing::warn!("Skipping {}: {e}", module.path.display());
                continue;
            }
        };
        for candidates in targets {
            let Some(target) = candidates.iter().find_map(|c| resolve_target(c, &known)) else {
                continue;
            };
            if target == module.name {
                continue;
            }
            if let Some(column) = entities.get_index_of(&truncate(target, depth)) {
                data[row][column] += 1;
            }
        }
    }

    let entities: Vec<String> = entities.into_iter().collect();
    let categories = entities.iter().map(|e| resolver.resolve(e)).collect();
    Ok(DesignStructureMatrix::new(entities, Some(categories), data)?)
}
