//! Prompt text for the tutorial pipeline.

pub const RANKING_SYSTEM: &str = "You are a smart assistant. Analyze these search results and \
determine the most relevant website url based on the user's query.
Respond in the following JSON format:
```
{\"most_relevant_link\": \"link_here\", \"reason\": \"explanation_here\"}
```
Everything between the ``` must be valid JSON.";

pub const EXTRACTION_SYSTEM: &str = "You are a smart assistant. Analyze the given webpage content \
and extract the tutorial title and exact step-by-step instructions relevant to the user's query, \
including actions and exact web elements where applicable.
Note: **text** is a bold text, meaning that if the bold text is in a step, it's very likely to be \
the exact web element name.
If a step doesn't involve the user acting on a web element, or the web element is possibly not \
findable on the user interface, use \"\" for \"action\" and \"web_element\".
Respond in the following JSON format:
```{\"tutorial_title\": \"title_here\",
    \"steps\": [
        {\"step_count\": \"1\", \"step\": \"description_of_step_1\", \"action\": \"action_1\", \"web_element\": \"findable_web_element_1\"},
        {\"step_count\": \"2\", \"step\": \"description_of_step_2\", \"action\": \"action_2\", \"web_element\": \"findable_web_element_2\"}
    ]}```
Everything between the ``` must be valid JSON.
If you don't think this webpage is meant to be an instruction or tutorial, please return an empty string.";

pub fn search_query(action: &str, software: &str) -> String {
    format!("{} on {}?", action, software)
}

pub fn ranking_user(query: &str, results_json: &str) -> String {
    format!(
        "The user query is '{}'. Here are the search results: {}.",
        query, results_json
    )
}

pub fn extraction_user(query: &str, page_content: &str) -> String {
    format!(
        "The user query is '{}'. Analyze the following webpage content and extract the relevant \
         step-by-step instruction: '{}'. If you think that the user query doesn't match with the \
         tutorial title and content of the steps, then please return an empty string.",
        query, page_content
    )
}
