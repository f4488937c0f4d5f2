use std::{collections::BTreeMap, fmt, io, sync::Arc};

#[derive(Debug, Clone)]
pub struct BugError {
    pub key: &'static str,
    pub args: BTreeMap<&'static str, String>,
    pub causes: Vec<BugCause>,
}

#[derive(Debug, Clone)]
pub enum BugCause {
    Bug(Box<BugError>),
    Std(Arc<dyn std::error::Error + Send + Sync>),
}

impl BugError {
    pub fn new(key: &'static str) -> Self {
        Self {
            key,
            args: BTreeMap::new(),
            causes: Vec::new(),
        }
    }

    pub fn with_arg(mut self, k: &'static str, v: impl ToString) -> Self {
        self.args.insert(k, v.to_string());
        self
    }

    pub fn push_std(mut self, cause: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.causes.push(BugCause::Std(Arc::new(cause)));
        self
    }
}

impl fmt::Display for BugError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.key)?;
        let mut first = true;
        for (k, v) in &self.args {
            if !first {
                write!(f, ", ")?;
            }
            first = false;
            write!(f, "{k}={v}")?;
        }
        write!(f, ")")
    }
}

impl std::error::Error for BugError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.causes.iter().find_map(|c| match c {
            BugCause::Bug(e) => Some(e.as_ref() as &dyn std::error::Error),
            BugCause::Std(e) => Some(e.as_ref()),
        })
    }
}

impl From<String> for BugError {
    fn from(s: String) -> Self {
        BugError::new("string-error").with_arg("msg", s)
    }
}

impl From<&str> for BugError {
    fn from(s: &str) -> Self {
        BugError::new("str-error").with_arg("msg", s)
    }
}

impl From<io::Error> for BugError {
    fn from(err: io::Error) -> Self {
        BugError::new("io-error").push_std(err)
    }
}

impl From<crate::scene::loader::LoadError> for BugError {
    fn from(err: crate::scene::loader::LoadError) -> Self {
        BugError::new("load-error").push_std(err)
    }
}

impl From<wgpu::CreateSurfaceError> for BugError {
    fn from(err: wgpu::CreateSurfaceError) -> Self {
        BugError::new("wgpu::CreateSurfaceError").push_std(err)
    }
}

impl From<winit::error::EventLoopError> for BugError {
    fn from(err: winit::error::EventLoopError) -> Self {
        BugError::new("winit::error::EventLoopError").push_std(err)
    }
}
