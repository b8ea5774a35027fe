//! Handler signatures and the three-argument contract.

use crate::adapter::param::{Access, ParamInfo, ParamKind};
use crate::error::AdaptError;
use crate::shape::Shape;

/// Number of parameters every use case takes: context, request, response.
pub const ARITY: usize = 3;

/// The declared parameter list of a handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    name: &'static str,
    params: Vec<ParamInfo>,
}

impl Signature {
    pub fn new(name: &'static str, params: Vec<ParamInfo>) -> Self {
        Self { name, params }
    }

    /// Type name of the handler this signature was taken from.
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn arity(&self) -> usize {
        self.params.len()
    }

    pub fn params(&self) -> &[ParamInfo] {
        &self.params
    }

    /// Checks the signature against the three-argument contract.
    ///
    /// Parameters are checked in order, so the first offending position
    /// determines the error.
    pub fn validate(&self) -> Result<Contract, AdaptError> {
        let [context, request, response] = self.params.as_slice() else {
            return Err(AdaptError::InvalidArity {
                expected: ARITY,
                given: self.arity(),
            });
        };

        if context.kind() != ParamKind::Context {
            return Err(AdaptError::InvalidContextParam {
                given: context.type_name(),
            });
        }

        let request = match request.kind() {
            ParamKind::Request {
                shape,
                access: Access::Owned | Access::Shared,
            } => shape,
            _ => {
                return Err(AdaptError::InvalidRequestParam {
                    given: request.type_name(),
                });
            }
        };

        let response = match response.kind() {
            ParamKind::Response {
                shape,
                access: Access::Exclusive,
            } => shape,
            _ => {
                return Err(AdaptError::InvalidResponseParam {
                    given: response.type_name(),
                });
            }
        };

        Ok(Contract { request, response })
    }
}

/// The request and response shapes a validated use case expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Contract {
    pub request: Shape,
    pub response: Shape,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::Context;
    use crate::message::{Request, Response};

    struct Query;
    impl Request for Query {}

    struct Answer;
    impl Response for Answer {}

    fn context() -> ParamInfo {
        ParamInfo::new::<&dyn Context>(ParamKind::Context)
    }

    fn request(access: Access) -> ParamInfo {
        ParamInfo::new::<Query>(ParamKind::Request {
            shape: Shape::of::<Query>(),
            access,
        })
    }

    fn response(access: Access) -> ParamInfo {
        ParamInfo::new::<Answer>(ParamKind::Response {
            shape: Shape::of::<Answer>(),
            access,
        })
    }

    fn validate(params: Vec<ParamInfo>) -> Result<Contract, AdaptError> {
        Signature::new("handler", params).validate()
    }

    #[test]
    fn test_valid_signatures() {
        let expected = Contract {
            request: Shape::of::<Query>(),
            response: Shape::of::<Answer>(),
        };
        for access in [Access::Owned, Access::Shared] {
            assert_eq!(
                validate(vec![context(), request(access), response(Access::Exclusive)]),
                Ok(expected)
            );
        }
    }

    #[test]
    fn test_arity_is_checked_first() {
        assert_eq!(
            validate(vec![ParamInfo::opaque::<u8>(); 2]),
            Err(AdaptError::InvalidArity {
                expected: 3,
                given: 2
            })
        );
        assert_eq!(
            validate(vec![]),
            Err(AdaptError::InvalidArity {
                expected: 3,
                given: 0
            })
        );
    }

    #[test]
    fn test_positions_are_checked_in_order() {
        let err = validate(vec![
            ParamInfo::opaque::<u8>(),
            ParamInfo::opaque::<u8>(),
            ParamInfo::opaque::<u8>(),
        ]);
        assert_eq!(err, Err(AdaptError::InvalidContextParam { given: "u8" }));

        let err = validate(vec![context(), response(Access::Exclusive), response(Access::Exclusive)]);
        assert!(matches!(err, Err(AdaptError::InvalidRequestParam { .. })));

        let err = validate(vec![context(), request(Access::Exclusive), response(Access::Exclusive)]);
        assert!(matches!(err, Err(AdaptError::InvalidRequestParam { .. })));

        for access in [Access::Owned, Access::Shared] {
            let err = validate(vec![context(), request(Access::Owned), response(access)]);
            assert!(matches!(err, Err(AdaptError::InvalidResponseParam { .. })));
        }
    }
}
