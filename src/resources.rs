pub static LAYOUT: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{{title}}</title>
    <link rel="stylesheet" href="{{assets}}site.css">
</head>
<body{{#if scroll_locked}} class="modal-open"{{/if}}>
{{{body}}}
<script src="{{assets}}modal.js"></script>
</body>
</html>
"#;

pub static INDEX: &str = r#"<header>
    <h1>{{title}}</h1>
    <div class="counters">
        <span id="total-papers">{{totals.papers}}</span> papers
        across <span id="total-categories">{{totals.categories}}</span> categories
    </div>
    {{#if failures}}
    <div class="load-failures">
        Could not load:
        {{#each failures}}<span class="failed-document" title="{{reason}}">{{document}}</span>{{/each}}
    </div>
    {{/if}}
</header>
<main id="taxonomy-container">
{{#each sections}}
    <section class="taxonomy-section" id="{{anchor}}">
        <h2>{{category}}</h2>
        {{#if description}}<p class="taxonomy-description">{{description}}</p>{{/if}}
        <p class="paper-count">{{count_label}}</p>
        <div class="papers-grid">
        {{#each cards}}
            <article class="paper-card">
                <h3 class="paper-title">{{title}}</h3>
                <p class="paper-authors">{{authors}}</p>
                <p class="paper-meta"><span class="paper-year">{{year}}</span>{{#if venue}} <span class="paper-venue">{{venue}}</span>{{/if}}</p>
                <div class="paper-actions">
                    <a class="scholar-link" href="{{search_url}}" target="_blank" rel="noopener">Search citation</a>
                    <a class="details-link" href="{{details_href}}">Details</a>
                </div>
            </article>
        {{/each}}
        </div>
    </section>
{{/each}}
</main>
{{#if modal}}
<div class="modal-backdrop" id="paper-modal" data-close="{{home}}">
    <div class="modal-content" role="dialog" aria-modal="true">
        <a class="modal-close" href="{{home}}" aria-label="Close">&times;</a>
        <h2 id="modal-title">{{modal.title}}</h2>
        <p id="modal-authors">{{modal.authors}}</p>
        <p class="modal-meta"><span id="modal-year">{{modal.year}}</span> <span id="modal-venue">{{modal.venue}}</span></p>
        <h3>Abstract</h3>
        <p id="modal-abstract">{{modal.abstract}}</p>
        <h3>BibTeX</h3>
        <pre id="modal-bibtex">{{modal.bibtex}}</pre>
    </div>
</div>
{{/if}}
"#;

pub static STYLESHEET: &str = r#"body { font-family: sans-serif; margin: 0 auto; max-width: 72rem; padding: 0 1rem; }
body.modal-open { overflow: hidden; }
.counters { color: #555; }
.load-failures { color: #a33; font-size: 0.9rem; }
.failed-document { margin-left: 0.5rem; }
.papers-grid { display: grid; grid-template-columns: repeat(auto-fill, minmax(18rem, 1fr)); gap: 1rem; }
.paper-card { border: 1px solid #ddd; border-radius: 4px; padding: 1rem; }
.paper-actions a { margin-right: 1rem; }
.modal-backdrop { position: fixed; inset: 0; background: rgba(0, 0, 0, 0.5); display: flex; align-items: center; justify-content: center; }
.modal-content { background: #fff; max-width: 48rem; max-height: 90vh; overflow-y: auto; padding: 1.5rem; border-radius: 4px; position: relative; }
.modal-close { position: absolute; top: 0.5rem; right: 1rem; font-size: 1.5rem; text-decoration: none; }
#modal-bibtex { white-space: pre-wrap; background: #f6f6f6; padding: 0.5rem; }
"#;

/// Escape and backdrop clicks follow the close link.
pub static MODAL_SCRIPT: &str = r#"(function () {
    var backdrop = document.getElementById('paper-modal');
    if (!backdrop) { return; }
    var close = function () { window.location.href = backdrop.getAttribute('data-close'); };
    backdrop.addEventListener('click', function (event) {
        if (event.target === backdrop) { close(); }
    });
    document.addEventListener('keydown', function (event) {
        if (event.key === 'Escape') { close(); }
    });
})();
"#;
