// ============================================================================
// File: src/markdown.rs
// Markdown export of a loaded recipe card
// ============================================================================

use anyhow::{anyhow, Result};
use chrono::Local;
use std::fs;
use std::path::Path;

use crate::models::RecipeDetail;

pub struct MarkdownExporter<'a> {
    recipe: &'a RecipeDetail,
}

impl<'a> MarkdownExporter<'a> {
    pub fn new(recipe: &'a RecipeDetail) -> Self {
        Self { recipe }
    }

    pub fn export(&self, path: &Path) -> Result<()> {
        fs::write(path, self.render())
            .map_err(|e| anyhow!("Failed to write {}: {}", path.display(), e))
    }

    pub fn render(&self) -> String {
        let mut content = String::new();

        self.write_header(&mut content);
        self.write_ingredients(&mut content);
        self.write_summary(&mut content);
        self.write_steps(&mut content);

        content
    }

    fn write_header(&self, content: &mut String) {
        content.push_str(&format!("# {}\n\n", self.recipe.title));
        content.push_str(&format!("**Saved**: {}\n\n", Local::now().format("%Y-%m-%d %H:%M:%S")));
        content.push_str(&format!("![{}]({})\n\n", self.recipe.title, self.recipe.image_url));
        content.push_str(&format!(
            "**Ready In**: {} mins | **Servings**: {}\n\n",
            self.recipe.ready_in_minutes, self.recipe.servings
        ));
    }

    fn write_ingredients(&self, content: &mut String) {
        content.push_str("## Ingredients\n\n");
        for ingredient in &self.recipe.ingredients {
            content.push_str(&format!("- {}\n", ingredient));
        }
        content.push('\n');
    }

    // Markdown allows inline HTML, so the summary goes in unchanged.
    fn write_summary(&self, content: &mut String) {
        content.push_str("## Summary\n\n");
        content.push_str(&self.recipe.summary_html);
        content.push_str("\n\n");
    }

    fn write_steps(&self, content: &mut String) {
        content.push_str("## Steps\n\n");
        for (i, step) in self.recipe.steps.iter().enumerate() {
            content.push_str(&format!("{}. {}\n", i + 1, step));
        }
    }
}
