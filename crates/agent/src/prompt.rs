use repdash_core::AiContext;

const PREAMBLE: &str = "You are a helpful sales analytics assistant. \
    Use the following context to answer the question. \
    If the question cannot be answered with the given context, say so.";

/// Render the fixed prompt layout: preamble, context block, question,
/// answer cue. The layout is part of the upstream contract and must not
/// vary between calls.
pub fn render(question: &str, context: &AiContext<'_>) -> String {
    format!(
        "{PREAMBLE}\n\nContext:\n{context}\n\nQuestion: {question}\n\nAnswer:",
        context = context.to_pretty_json(),
    )
}
