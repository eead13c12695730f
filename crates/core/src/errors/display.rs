//! Display implementations for error types
//!
//! Messages are shown verbatim in console notices.

use super::types::Error;
use std::fmt;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Unauthenticated { .. } => {
                write!(f, "tu sesión ha expirado, por favor inicia sesión nuevamente")
            }
            Error::PermissionDenied { operation, message } => {
                write!(
                    f,
                    "no tienes permisos suficientes para realizar '{operation}'"
                )?;
                if let Some(message) = message {
                    write!(f, ": {message}")?;
                }
                Ok(())
            }
            Error::SessionInvalid { .. } => {
                write!(
                    f,
                    "la sesión de super administrador ya no es válida, verifica tu acceso nuevamente"
                )
            }
            Error::Unauthorized { operation } => {
                write!(
                    f,
                    "no hay una sesión de super administrador activa para '{operation}'"
                )
            }
            Error::OperationInProgress {
                operation,
                target_id,
            } => match target_id {
                Some(target) => {
                    write!(f, "operación ya en progreso: '{operation}' sobre '{target}'")
                }
                None => write!(f, "operación ya en progreso: '{operation}'"),
            },
            Error::Remote {
                operation,
                status,
                message,
            } => {
                write!(f, "error al ejecutar '{operation}' ({status})")?;
                if let Some(message) = message {
                    write!(f, ": {message}")?;
                }
                write!(f, ", inténtalo de nuevo")
            }
            Error::Network { endpoint, message } => {
                write!(
                    f,
                    "error de red al contactar '{endpoint}': {message}, inténtalo de nuevo"
                )
            }
            Error::Timeout {
                operation,
                duration,
            } => {
                write!(
                    f,
                    "la operación '{operation}' excedió el tiempo límite de {duration:?}"
                )
            }
            Error::Configuration { message } => {
                write!(f, "error de configuración: {message}")
            }
            Error::Json { message, .. } => {
                write!(f, "respuesta inválida del servidor: {message}")
            }
        }
    }
}
