use crate::models::{RenderBlock, SearchOutcome, SearchResult};
use crate::omdb::NO_POSTER;
use anyhow::{Context, Result};
use minijinja::{context, Environment};

pub const GENERIC_ERROR: &str = "An error occurred. Please try again.";

pub fn render_outcome(outcome: SearchOutcome, placeholder: &str) -> Vec<RenderBlock> {
    match outcome {
        SearchOutcome::Found(results) => results
            .into_iter()
            .map(|r| movie_item(r, placeholder))
            .collect(),
        SearchOutcome::Rejected(text) => vec![RenderBlock::Message { text }],
    }
}

pub fn render_failure() -> Vec<RenderBlock> {
    vec![RenderBlock::Message {
        text: GENERIC_ERROR.to_string(),
    }]
}

pub fn poster_src(poster: &str, placeholder: &str) -> String {
    if poster == NO_POSTER {
        placeholder.to_string()
    } else {
        poster.to_string()
    }
}

fn movie_item(result: SearchResult, placeholder: &str) -> RenderBlock {
    RenderBlock::MovieItem {
        poster_src: poster_src(&result.poster_url, placeholder),
        alt: result.title.clone(),
        title: result.title,
        year: result.year,
    }
}

const RESULTS_TEMPLATE: &str = r#"{% for block in blocks %}{% if block.kind == "movie_item" %}<div class="movie-item"><img src="{{ block.poster_src }}" alt="{{ block.alt }}"><h2>{{ block.title }}</h2><p>Year: {{ block.year }}</p></div>{% else %}<p>{{ block.text }}</p>{% endif %}{% endfor %}"#;

const INDEX_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Movie Finder</title>
</head>
<body>
<form id="movieForm">
  <input type="text" id="movieName" name="movieName" placeholder="Movie title">
  <button type="submit">Search</button>
</form>
<div id="movieResults"></div>
<script>
document.getElementById('movieForm').addEventListener('submit', function (e) {
  e.preventDefault();
  const q = document.getElementById('movieName').value;
  const results = document.getElementById('movieResults');
  fetch('/search?s=' + encodeURIComponent(q))
    .then(function (r) { return r.text(); })
    .then(function (html) { results.innerHTML = html; })
    .catch(function (err) {
      console.log('Error:', err);
      results.innerHTML = '<p>{{ generic_error }}</p>';
    });
});
</script>
</body>
</html>
"#;

// The .html names turn on auto-escaping; upstream text is data, never markup.
fn environment() -> Result<Environment<'static>> {
    let mut env = Environment::new();
    env.add_template("results.html", RESULTS_TEMPLATE)
        .context("Failed to add results template")?;
    env.add_template("index.html", INDEX_TEMPLATE)
        .context("Failed to add index template")?;
    Ok(env)
}

pub fn to_html(blocks: &[RenderBlock]) -> Result<String> {
    let env = environment()?;
    let html = env
        .get_template("results.html")?
        .render(context! { blocks })
        .context("Failed to render results template")?;
    Ok(html)
}

pub fn index_page() -> Result<String> {
    let env = environment()?;
    let html = env
        .get_template("index.html")?
        .render(context! { generic_error => GENERIC_ERROR })
        .context("Failed to render index template")?;
    Ok(html)
}
