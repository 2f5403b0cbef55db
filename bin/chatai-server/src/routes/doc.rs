use utoipa::OpenApi;

use super::{chat, chat_page, dashboard, files, health, messages, projects, prompts};

#[derive(OpenApi)]
#[openapi(info(
    title = "chatai-server",
    description = "Project-scoped AI chat API",
    version = "0.1.0"
))]
pub struct ApiDoc;

pub fn get_docs() -> utoipa::openapi::OpenApi {
    let mut root = ApiDoc::openapi();
    root.merge(health::HealthApi::openapi());
    root.merge(dashboard::DashboardApi::openapi());
    root.merge(projects::ProjectsApi::openapi());
    root.merge(prompts::PromptsApi::openapi());
    root.merge(files::FilesApi::openapi());
    root.merge(messages::MessagesApi::openapi());
    root.merge(chat::ChatApi::openapi());
    root.merge(chat_page::ChatPageApi::openapi());
    root
}
