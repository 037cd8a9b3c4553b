//! Route and payload descriptors consumed by the generator.

use std::fmt;

use serde::{Deserialize, Serialize};

/// AsyncAPI version emitted in every generated document.
pub const ASYNCAPI_VERSION: &str = "3.0.0";

/// Generic argument values that mean "no generic argument".
const NO_GENERIC_SENTINELS: &[&str] = &["Void", "void", "()", "java.lang.Void"];

/// Simple names of container types whose payload is a JSON array.
pub const LIST_WRAPPERS: &[&str] = &[
    "List",
    "ArrayList",
    "LinkedList",
    "Collection",
    "Iterable",
    "Vec",
    "VecDeque",
];

/// A type name as declared by the discovery layer, possibly qualified
/// (`com.example.RoomView`, `crate::rooms::RoomView`).
///
/// Two idents are the same type only if their full names match.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeIdent(String);

impl TypeIdent {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into().trim().to_string())
    }

    /// Full name as declared.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Name with package, module, and enclosing-type qualifiers removed.
    pub fn simple_name(&self) -> &str {
        let name = self.0.rsplit("::").next().unwrap_or(&self.0);
        name.rsplit(['.', '$']).next().unwrap_or(name)
    }

    /// Whether this type is a list-like container.
    pub fn is_list_wrapper(&self) -> bool {
        LIST_WRAPPERS.contains(&self.simple_name())
    }

    fn is_no_generic_sentinel(&self) -> bool {
        NO_GENERIC_SENTINELS.contains(&self.0.as_str())
    }
}

impl fmt::Display for TypeIdent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TypeIdent {
    fn from(name: &str) -> Self {
        TypeIdent::new(name)
    }
}

impl From<String> for TypeIdent {
    fn from(name: String) -> Self {
        TypeIdent::new(name)
    }
}

/// The type carried by a message: a base type plus an optional single
/// generic element (`List<RoomView>` is base `List`, element `RoomView`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PayloadType {
    pub base: TypeIdent,
    pub element: Option<TypeIdent>,
}

impl PayloadType {
    /// A non-generic payload type.
    pub fn plain(base: impl Into<TypeIdent>) -> Self {
        Self {
            base: base.into(),
            element: None,
        }
    }

    /// A payload type with a generic element.
    ///
    /// An explicit "no generic" sentinel such as `Void` yields a plain type.
    pub fn generic(base: impl Into<TypeIdent>, element: impl Into<TypeIdent>) -> Self {
        let element = element.into();
        Self {
            base: base.into(),
            element: (!element.is_no_generic_sentinel()).then_some(element),
        }
    }

    /// Whether the payload serializes as a JSON array.
    pub fn is_list(&self) -> bool {
        self.base.is_list_wrapper()
    }
}

impl fmt::Display for PayloadType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.element {
            Some(element) => write!(f, "{}<{}>", self.base, element),
            None => write!(f, "{}", self.base),
        }
    }
}

/// Optional human-readable documentation attached to a route or response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Documentation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Documentation {
    pub fn new(summary: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            summary: Some(summary.into()),
            description: Some(description.into()),
        }
    }
}

/// A handler parameter.
///
/// Path variables are bound from the destination address and never carried
/// as message payloads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterDescriptor {
    pub name: String,
    pub payload: PayloadType,
    pub path_variable: bool,
}

impl ParameterDescriptor {
    pub fn payload(name: impl Into<String>, payload: PayloadType) -> Self {
        Self {
            name: name.into(),
            payload,
            path_variable: false,
        }
    }

    pub fn path_variable(name: impl Into<String>, payload: PayloadType) -> Self {
        Self {
            name: name.into(),
            payload,
            path_variable: true,
        }
    }
}

/// A server-originated message destination.
///
/// The address is relative to the outbound prefix and may contain
/// `{placeholder}` path variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseDescriptor {
    pub address: String,
    pub payload: PayloadType,
    pub docs: Documentation,
}

impl ResponseDescriptor {
    pub fn new(address: impl Into<String>, payload: PayloadType) -> Self {
        Self {
            address: address.into(),
            payload,
            docs: Documentation::default(),
        }
    }

    pub fn with_docs(mut self, docs: Documentation) -> Self {
        self.docs = docs;
        self
    }
}

/// A client-originated message destination, relative to the inbound prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteDescriptor {
    pub address: String,
    pub parameters: Vec<ParameterDescriptor>,
    pub docs: Documentation,
    /// The reply this route triggers, if any.
    pub response: Option<ResponseDescriptor>,
}

impl RouteDescriptor {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            parameters: Vec::new(),
            docs: Documentation::default(),
            response: None,
        }
    }

    pub fn with_parameter(mut self, parameter: ParameterDescriptor) -> Self {
        self.parameters.push(parameter);
        self
    }

    pub fn with_docs(mut self, docs: Documentation) -> Self {
        self.docs = docs;
        self
    }

    pub fn with_response(mut self, response: ResponseDescriptor) -> Self {
        self.response = Some(response);
        self
    }

    /// Parameters carried in the message body.
    pub fn payload_parameters(&self) -> impl Iterator<Item = &ParameterDescriptor> {
        self.parameters.iter().filter(|p| !p.path_variable)
    }

    /// Parameters bound from the destination address.
    pub fn path_variables(&self) -> impl Iterator<Item = &ParameterDescriptor> {
        self.parameters.iter().filter(|p| p.path_variable)
    }
}

/// The complete set of routes to document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Routes {
    /// Inbound routes, each with an optional correlated reply.
    pub routes: Vec<RouteDescriptor>,
    /// Responses the server publishes without an inbound trigger.
    pub broadcasts: Vec<ResponseDescriptor>,
}

impl Routes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_route(mut self, route: RouteDescriptor) -> Self {
        self.routes.push(route);
        self
    }

    pub fn with_broadcast(mut self, response: ResponseDescriptor) -> Self {
        self.broadcasts.push(response);
        self
    }

    /// Every outbound response: replies in route order, then broadcasts.
    ///
    /// The second element is the originating route for replies.
    pub fn responses(&self) -> impl Iterator<Item = (&ResponseDescriptor, Option<&RouteDescriptor>)> {
        self.routes
            .iter()
            .filter_map(|route| route.response.as_ref().map(|r| (r, Some(route))))
            .chain(self.broadcasts.iter().map(|r| (r, None)))
    }
}
