use http::Method;
use std::sync::Arc;

use crate::context::Context;
use crate::hooks::Hook;
use crate::response::HttpResponse;

/// Handler function shared across request coroutines.
pub type Handler = Arc<dyn Fn(&Context) -> HttpResponse + Send + Sync>;

/// One handler bound to a method and path.
#[derive(Clone)]
pub struct Action {
    pub(crate) method: Method,
    pub(crate) path: String,
    pub(crate) name: String,
    pub(crate) hooks: Vec<Arc<dyn Hook>>,
    pub(crate) handler: Handler,
}

impl Action {
    /// Create an action. `name` identifies it within its controller for
    /// OpenAPI metadata.
    pub fn new<F>(method: Method, path: impl Into<String>, name: impl Into<String>, handler: F) -> Self
    where
        F: Fn(&Context) -> HttpResponse + Send + Sync + 'static,
    {
        Self {
            method,
            path: path.into(),
            name: name.into(),
            hooks: Vec::new(),
            handler: Arc::new(handler),
        }
    }

    pub fn get<F>(path: impl Into<String>, name: impl Into<String>, handler: F) -> Self
    where
        F: Fn(&Context) -> HttpResponse + Send + Sync + 'static,
    {
        Self::new(Method::GET, path, name, handler)
    }

    pub fn post<F>(path: impl Into<String>, name: impl Into<String>, handler: F) -> Self
    where
        F: Fn(&Context) -> HttpResponse + Send + Sync + 'static,
    {
        Self::new(Method::POST, path, name, handler)
    }

    pub fn put<F>(path: impl Into<String>, name: impl Into<String>, handler: F) -> Self
    where
        F: Fn(&Context) -> HttpResponse + Send + Sync + 'static,
    {
        Self::new(Method::PUT, path, name, handler)
    }

    pub fn patch<F>(path: impl Into<String>, name: impl Into<String>, handler: F) -> Self
    where
        F: Fn(&Context) -> HttpResponse + Send + Sync + 'static,
    {
        Self::new(Method::PATCH, path, name, handler)
    }

    pub fn delete<F>(path: impl Into<String>, name: impl Into<String>, handler: F) -> Self
    where
        F: Fn(&Context) -> HttpResponse + Send + Sync + 'static,
    {
        Self::new(Method::DELETE, path, name, handler)
    }

    /// Add a hook that runs before this action only.
    #[must_use]
    pub fn hook(self, hook: impl Hook + 'static) -> Self {
        self.shared_hook(Arc::new(hook))
    }

    /// Add an already shared hook.
    #[must_use]
    pub fn shared_hook(mut self, hook: Arc<dyn Hook>) -> Self {
        self.hooks.push(hook);
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// A named group of actions with a common path prefix and hooks.
#[derive(Clone)]
pub struct Controller {
    pub(crate) name: String,
    pub(crate) path: String,
    pub(crate) hooks: Vec<Arc<dyn Hook>>,
    pub(crate) actions: Vec<Action>,
    pub(crate) children: Vec<Controller>,
}

impl Controller {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: String::new(),
            hooks: Vec::new(),
            actions: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Path prefix for every action and sub-controller.
    #[must_use]
    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    /// Add a hook that runs before every action of this controller and its
    /// sub-controllers.
    #[must_use]
    pub fn hook(self, hook: impl Hook + 'static) -> Self {
        self.shared_hook(Arc::new(hook))
    }

    /// Add an already shared hook.
    #[must_use]
    pub fn shared_hook(mut self, hook: Arc<dyn Hook>) -> Self {
        self.hooks.push(hook);
        self
    }

    #[must_use]
    pub fn action(mut self, action: Action) -> Self {
        self.actions.push(action);
        self
    }

    #[must_use]
    pub fn subcontroller(mut self, child: Controller) -> Self {
        self.children.push(child);
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Wrap a bare handler into an anonymous single-action controller.
///
/// Every such controller is named `AnonymousController`; [`App::new`](super::App::new)
/// keys repeated names apart (`AnonymousController#2`, ...).
pub fn attach_handler<F>(method: Method, path: impl Into<String>, handler: F) -> Controller
where
    F: Fn(&Context) -> HttpResponse + Send + Sync + 'static,
{
    Controller::new("AnonymousController").action(Action::new(method, path, "handler", handler))
}
