//! REST path composition: `{base}/api/{module}/{controller}/{method}`.

use std::fmt;
use std::str::FromStr;

use reqwest::Url;

use crate::error::ApiError;

/// Top-level API namespace, one per firewall plugin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Module {
    Unbound,
}

/// Sub-namespace within a module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Controller {
    Settings,
    Service,
}

impl Module {
    pub fn as_str(self) -> &'static str {
        match self {
            Module::Unbound => "unbound",
        }
    }
}

impl Controller {
    pub fn as_str(self) -> &'static str {
        match self {
            Controller::Settings => "settings",
            Controller::Service => "service",
        }
    }
}

impl fmt::Display for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Controller {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Module {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "unbound" => Ok(Module::Unbound),
            other => Err(ApiError::InvalidEndpoint {
                kind: "module",
                value: other.to_string(),
            }),
        }
    }
}

impl FromStr for Controller {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "settings" => Ok(Controller::Settings),
            "service" => Ok(Controller::Service),
            other => Err(ApiError::InvalidEndpoint {
                kind: "controller",
                value: other.to_string(),
            }),
        }
    }
}

/// `{base}/api/{module}`
pub fn module_endpoint(base: &Url, module: Module) -> String {
    format!("{}/api/{}", base.as_str().trim_end_matches('/'), module)
}

/// `{base}/api/{module}/{controller}`
pub fn controller_endpoint(base: &Url, module: Module, controller: Controller) -> String {
    format!("{}/{}", module_endpoint(base, module), controller)
}

/// `{base}/api/{module}/{controller}/{method}`
pub fn method_endpoint(
    base: &Url,
    module: Module,
    controller: Controller,
    method: &str,
) -> String {
    format!("{}/{}", controller_endpoint(base, module, controller), method)
}
