//! Reply composition: pure formatting of every pipeline outcome.
//!
//! No business logic here; nothing in this module touches the cache or
//! the upstream client.

use order_core::{LookupError, OrderStatusResult, TrackingCode, UserIdentity};

/// Fixed warning sent whenever the content filter trips.
pub const PROFANITY_WARNING: &str = "⚠️ *Lenguaje inapropiado detectado*\n\n\
    Por favor mantén un tono respetuoso.\n\
    Estoy aquí para ayudarte con tu pedido.";

/// Greeting with the command menu.
pub fn greeting() -> &'static str {
    "¡Hola! 👋 Soy tu asistente virtual.\n\n\
     Para consultar tu pedido, envía *1*\n\
     o directamente tu *código de seguimiento*.\n\
     Ejemplo: `PED-123`\n\n\
     También puedes escribir *ayuda* para más información."
}

/// Command reference.
pub fn help() -> &'static str {
    "🤖 *Comandos disponibles:*\n\n\
     • `hola` - Saludo inicial\n\
     • `1` - Consultar un pedido\n\
     • `XXX-123` - Consultar pedido por código\n\
     • `ayuda` - Mostrar esta ayuda\n\n\
     Ejemplos de códigos:\n\
     • `PED-123`\n\
     • `ORD-456`\n\
     • `FAC-789`"
}

/// Prompt after the user picks the lookup menu option.
pub fn prompt_for_code() -> &'static str {
    "🔎 *Consulta de pedido*\n\n\
     Envía tu *código de seguimiento*.\n\
     Ejemplo: `PED-123`"
}

/// Prompt when input while awaiting a code was not a valid code.
pub fn retry_code_prompt() -> &'static str {
    "🤔 Eso no parece un código válido.\n\n\
     Envía un código como `PED-123`,\n\
     o escribe *ayuda* para ver las opciones."
}

/// Fallback for input that matched nothing.
pub fn unrecognized() -> &'static str {
    "🔍 *No reconozco tu solicitud*\n\n\
     Envía tu *código de seguimiento* (ej: `PED-123`)\n\
     o escribe *hola* para comenzar.\n\
     Para ayuda, escribe *ayuda*."
}

/// The fixed profanity warning.
pub fn profanity_warning() -> &'static str {
    PROFANITY_WARNING
}

/// Status card for a successful lookup.
pub fn order_status(result: &OrderStatusResult) -> String {
    let mut reply = String::from("📦 *Estado de tu pedido* 📦\n\n");
    reply.push_str(&format!("• Código: {}\n", result.code));
    reply.push_str(&format!(
        "• Estado: {} {}\n",
        result.status.emoji(),
        result.status.label()
    ));
    if !result.description.is_empty() {
        reply.push_str(&format!("• Producto: {}\n", result.description));
    }
    if let Some(customer) = &result.customer {
        reply.push_str(&format!("• Cliente: {}\n", customer));
    }
    if let Some(total) = &result.total {
        reply.push_str(&format!("• Total: {}\n", total));
    }
    if let Some(updated_at) = &result.updated_at {
        reply.push_str(&format!("• Fecha: {}\n", updated_at));
    }
    reply.push_str("\n¿Necesitas más ayuda? Escribe *ayuda* para opciones.");
    reply
}

/// Map a lookup failure to its user-facing message.
///
/// Each failure kind gets a distinct reply: not-found names the code,
/// timeout/unreachable ask the user to try again later, and upstream or
/// decode problems get the generic provider-error text.
pub fn lookup_failure(user: &UserIdentity, code: &TrackingCode, err: &LookupError) -> String {
    match err {
        LookupError::NotFound => format!(
            "❌ *Pedido no encontrado*\n\n\
             Usuario: {user}\n\
             Código: {code}\n\n\
             Verifica los datos e intenta nuevamente."
        ),
        LookupError::Timeout | LookupError::Unreachable(_) => String::from(
            "⏳ *Servicio no disponible*\n\n\
             No pudimos consultar tu pedido en este momento.\n\
             Intenta nuevamente más tarde.",
        ),
        LookupError::Upstream(_) | LookupError::Decode(_) => String::from(
            "⚠️ *Error al consultar tu pedido*\n\n\
             Ocurrió un problema con el servicio de pedidos.\n\
             Intenta nuevamente en unos minutos.",
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use order_core::OrderStatus;

    fn code(s: &str) -> TrackingCode {
        TrackingCode::parse(s).unwrap()
    }

    fn user() -> UserIdentity {
        UserIdentity::parse("1234567890").unwrap()
    }

    #[test]
    fn status_card_has_emoji_and_code() {
        let result = OrderStatusResult::new(code("ABC123"), OrderStatus::Shipped, "Libro")
            .with_customer("Ana")
            .with_total("45.00 USD");
        let reply = order_status(&result);

        assert!(reply.contains("ABC123"));
        assert!(reply.contains("🚚"));
        assert!(reply.contains("Enviado"));
        assert!(reply.contains("Cliente: Ana"));
        assert!(reply.contains("Total: 45.00 USD"));
    }

    #[test]
    fn status_card_omits_absent_fields() {
        let result = OrderStatusResult::new(code("ABC123"), OrderStatus::Pending, "");
        let reply = order_status(&result);

        assert!(!reply.contains("Producto:"));
        assert!(!reply.contains("Cliente:"));
        assert!(!reply.contains("Total:"));
        assert!(!reply.contains("Fecha:"));
    }

    #[test]
    fn not_found_names_the_code() {
        let reply = lookup_failure(&user(), &code("ABC-999"), &LookupError::NotFound);
        assert!(reply.contains("no encontrado"));
        assert!(reply.contains("ABC-999"));
        assert!(reply.contains("1234567890"));
    }

    #[test]
    fn failure_replies_are_distinct() {
        let u = user();
        let c = code("PED-123");
        let not_found = lookup_failure(&u, &c, &LookupError::NotFound);
        let timeout = lookup_failure(&u, &c, &LookupError::Timeout);
        let unreachable = lookup_failure(&u, &c, &LookupError::Unreachable("x".into()));
        let upstream = lookup_failure(&u, &c, &LookupError::Upstream(500));

        assert_ne!(not_found, timeout);
        assert_ne!(timeout, upstream);
        // Timeout and unreachable share the try-again-later text.
        assert_eq!(timeout, unreachable);
        assert!(timeout.contains("más tarde"));
    }

    #[test]
    fn warning_is_fixed() {
        assert_eq!(profanity_warning(), PROFANITY_WARNING);
        assert!(PROFANITY_WARNING.contains("Lenguaje inapropiado"));
    }
}
