//! Order hand-off to the store's WhatsApp.
//!
//! Produces one universal `wa.me` link and one fallback instruction for the
//! shopper. Opening the link is the caller's job.

use serde::Serialize;
use tracing::info;

use storefront_core::{DomainError, DomainResult};

use crate::device::DeviceCapabilities;
use crate::order::OrderNumber;
use crate::phone::digits_of;

/// Fewest digits a WhatsApp number can have (country code included).
pub const MIN_WHATSAPP_DIGITS: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WhatsAppHandoff {
    pub url: String,
    /// Shown if the link does not open WhatsApp.
    pub fallback_instruction: String,
    pub device: DeviceCapabilities,
}

impl WhatsAppHandoff {
    /// Build the hand-off for an order message addressed to `store_number`.
    ///
    /// `store_number` may carry any formatting (`+53 5469-0878`); only its
    /// digits go into the link. The fallback quotes it as given.
    pub fn prepare(
        store_number: &str,
        order_number: &OrderNumber,
        message: &str,
        device: DeviceCapabilities,
    ) -> DomainResult<Self> {
        let digits = digits_of(store_number);
        if digits.len() < MIN_WHATSAPP_DIGITS {
            return Err(DomainError::validation(format!(
                "WhatsApp number '{store_number}' needs at least {MIN_WHATSAPP_DIGITS} digits"
            )));
        }

        let url = format!(
            "https://wa.me/{digits}?text={}",
            urlencoding::encode(message)
        );
        let fallback_instruction = if device.is_desktop() {
            format!(
                "💻 Por favor, abre WhatsApp Web (web.whatsapp.com) o la aplicación de escritorio y contacta a {store_number} con el pedido #{order_number}"
            )
        } else {
            format!(
                "📱 Por favor, abre WhatsApp manualmente y contacta a {store_number} con el pedido #{order_number}"
            )
        };

        info!(
            order_number = %order_number,
            platform = ?device.platform,
            desktop = device.is_desktop(),
            "prepared WhatsApp order hand-off"
        );

        Ok(Self {
            url,
            fallback_instruction,
            device,
        })
    }
}
