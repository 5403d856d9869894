use std::path::{Path, PathBuf};

use anyhow::Context as _;
use log::{debug, info};

use crate::{
    context::{relative_import, Context},
    error::ScaffoldError,
    options::Options,
    slug,
    template::{PageData, Renderer},
};

const LAYOUT_FILE: &str = "MainGridLayout.astro";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ArtifactKind {
    Page,
    Content,
}

impl ArtifactKind {
    pub fn label(self) -> &'static str {
        match self {
            ArtifactKind::Page => "Page",
            ArtifactKind::Content => "Content",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Artifact {
    pub kind: ArtifactKind,
    pub path: PathBuf,
}

/// Files one invocation is going to create, in write order.
#[derive(Debug)]
struct Plan {
    slug: String,
    pages_dir: PathBuf,
    content_dir: Option<PathBuf>,
    page: PathBuf,
    content: Option<PathBuf>,
}

impl Plan {
    fn new(ctx: &Context, options: &Options) -> Result<Self, ScaffoldError> {
        let slug = slug::derive(&options.title)?;
        debug!("slug of {:?} is {slug:?}", options.title);

        let pages_dir = ctx.resolve(&options.pages_dir);
        let page = pages_dir.join(format!("{slug}.astro"));
        let (content_dir, content) = if options.only_page {
            (None, None)
        } else {
            let dir = ctx.resolve(&options.content_dir);
            let content = dir.join(format!("{slug}.md"));
            (Some(dir), Some(content))
        };

        Ok(Self {
            slug,
            pages_dir,
            content_dir,
            page,
            content,
        })
    }

    fn directories(&self) -> impl Iterator<Item = &Path> + '_ {
        std::iter::once(self.pages_dir.as_path()).chain(self.content_dir.as_deref())
    }

    fn artifacts(&self) -> Vec<Artifact> {
        let mut artifacts = Vec::with_capacity(2);
        if let Some(content) = &self.content {
            artifacts.push(Artifact {
                kind: ArtifactKind::Content,
                path: content.clone(),
            });
        }
        artifacts.push(Artifact {
            kind: ArtifactKind::Page,
            path: self.page.clone(),
        });
        artifacts
    }

    /// Every target is checked before anything is written.
    fn check_guards(&self, ctx: &Context) -> Result<(), ScaffoldError> {
        debug!("checking {:?}", self.page);
        if ctx.fs.exists(&self.page) {
            return Err(ScaffoldError::PageExists(
                ctx.display_path(&self.page).to_path_buf(),
            ));
        }
        if let Some(content) = &self.content {
            debug!("checking {content:?}");
            if ctx.fs.exists(content) {
                return Err(ScaffoldError::ContentExists(
                    ctx.display_path(content).to_path_buf(),
                ));
            }
        }
        Ok(())
    }

    fn check_directories(&self, ctx: &Context) -> Result<(), ScaffoldError> {
        match self.directories().find(|dir| !ctx.fs.exists(dir)) {
            Some(missing) => Err(ScaffoldError::MissingDirectory(
                ctx.display_path(missing).to_path_buf(),
            )),
            None => Ok(()),
        }
    }

    fn prepare_directories(&self, ctx: &Context) -> Result<(), ScaffoldError> {
        for dir in self.directories() {
            if !ctx.fs.exists(dir) {
                debug!("creating directory {dir:?}");
                ctx.fs
                    .create_dir_all(dir)
                    .map_err(|e| ScaffoldError::io(dir, e))?;
            }
        }
        Ok(())
    }
}

/// Create the content entry and page for `options.title`.
///
/// Returns the created files in the order they were written. Nothing is written
/// unless the slug is non-empty, no target exists yet and (with `strict_dirs`)
/// both target directories are present. With `dry_run` the same checks run and
/// the would-be files are returned without touching the filesystem.
pub(crate) fn scaffold(ctx: &Context, options: &Options) -> anyhow::Result<Vec<Artifact>> {
    let plan = Plan::new(ctx, options)?;
    plan.check_guards(ctx)?;
    if options.strict_dirs {
        plan.check_directories(ctx)?;
    }

    let artifacts = plan.artifacts();
    if options.dry_run {
        debug!("dry run: skipping writes");
        return Ok(artifacts);
    }

    // render everything up front so a template failure cannot leave half a page behind
    let renderer = Renderer::new()?;
    let layout = relative_import(
        &plan.pages_dir,
        &ctx.resolve(&options.layouts_dir).join(LAYOUT_FILE),
    );
    debug!("layout import is {layout:?}");
    let data = PageData {
        title: &options.title,
        slug: &plan.slug,
        collection: &options.collection,
        layout: &layout,
    };
    let page = renderer.page(&data, options.only_page)?;
    let content = match plan.content {
        Some(_) => Some(renderer.content(&data)?),
        None => None,
    };

    plan.prepare_directories(ctx)?;

    for artifact in artifacts.iter() {
        let body = match artifact.kind {
            ArtifactKind::Page => &page,
            // content is rendered whenever a content artifact is planned
            ArtifactKind::Content => content.as_deref().unwrap_or_default(),
        };
        ctx.fs
            .write_new(&artifact.path, body)
            .map_err(|e| ScaffoldError::io(&artifact.path, e))
            .with_context(|| format!("while writing {} file", artifact.kind.label()))?;
        info!("wrote {:?}", artifact.path);
    }

    Ok(artifacts)
}
