use anyhow::Context;
use handlebars::{handlebars_helper, Handlebars};
use serde::Serialize;

// `{{expr x}}` emits `{<x as JSON literal>}`, a template expression holding the value.
// Written as a helper because a literal `{` before `{{` would open a triple-stash.
handlebars_helper!(json: |v: Json| serde_json::to_string(v).unwrap_or_default());
handlebars_helper!(expr: |v: Json| format!("{{{}}}", serde_json::to_string(v).unwrap_or_default()));

const PAGE: &str = r#"---
import { getEntry, render } from "astro:content";
import Markdown from "@components/misc/Markdown.astro";
import MainGridLayout from {{json layout}};

const pagePost = await getEntry({{json collection}}, {{json slug}});

if (!pagePost) {
    throw new Error("Page content not found");
}

const { Content } = await render(pagePost);
---
<MainGridLayout title={{expr title}} description={{expr title}}>
    <div class="flex w-full rounded-[var(--radius-large)] overflow-hidden relative min-h-32">
        <div class="card-base z-10 px-9 py-6 relative w-full ">
            <Markdown class="mt-2">
                <Content />
            </Markdown>
        </div>
    </div>
</MainGridLayout>
"#;

const SHELL: &str = r#"---
import MainGridLayout from {{json layout}};
---
<MainGridLayout title={{expr title}} description={{expr title}}>
    <div class="flex w-full rounded-[var(--radius-large)] overflow-hidden relative min-h-32">
        <div class="card-base z-10 px-9 py-6 relative w-full ">
        </div>
    </div>
</MainGridLayout>
"#;

const CONTENT: &str = "# {{title}}\n";

#[derive(Serialize, Debug)]
pub(crate) struct PageData<'a> {
    pub title: &'a str,
    pub slug: &'a str,
    pub collection: &'a str,
    /// Import specifier of the layout component, relative to the page.
    pub layout: &'a str,
}

pub(crate) struct Renderer {
    handlebars: Handlebars<'static>,
}

impl Renderer {
    pub fn new() -> anyhow::Result<Self> {
        let mut handlebars = Handlebars::new();
        // output is Astro/markdown source, not HTML text
        handlebars.register_escape_fn(handlebars::no_escape);
        handlebars.register_helper("json", Box::new(json));
        handlebars.register_helper("expr", Box::new(expr));
        handlebars
            .register_template_string("page", PAGE)
            .context("page template")?;
        handlebars
            .register_template_string("shell", SHELL)
            .context("shell template")?;
        handlebars
            .register_template_string("content", CONTENT)
            .context("content template")?;

        Ok(Self { handlebars })
    }

    /// Page that looks its entry up in the content collection, or, with `only_page`,
    /// a bare layout shell with no lookup.
    pub fn page(&self, data: &PageData, only_page: bool) -> anyhow::Result<String> {
        let name = if only_page { "shell" } else { "page" };
        self.handlebars
            .render(name, data)
            .with_context(|| format!("while rendering {name} for {:?}", data.slug))
    }

    pub fn content(&self, data: &PageData) -> anyhow::Result<String> {
        self.handlebars
            .render("content", data)
            .with_context(|| format!("while rendering content for {:?}", data.slug))
    }
}
