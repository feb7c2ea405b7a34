// Listener binding
// No SO_REUSEPORT here: a second instance on the same port must fail with
// AddrInUse so the conflict gets reported instead of silently shared.

use std::net::SocketAddr;
use tokio::net::TcpListener;

pub async fn bind(addr: SocketAddr) -> std::io::Result<TcpListener> {
    TcpListener::bind(addr).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_second_bind_is_addr_in_use() {
        let first = bind("127.0.0.1:0".parse().unwrap()).await.unwrap();
        let addr = first.local_addr().unwrap();

        let second = bind(addr).await;
        assert_eq!(
            second.unwrap_err().kind(),
            std::io::ErrorKind::AddrInUse
        );
    }

    #[tokio::test]
    async fn test_port_released_on_drop() {
        let addr;
        {
            let listener = bind("127.0.0.1:0".parse().unwrap()).await.unwrap();
            addr = listener.local_addr().unwrap();
        }
        assert!(bind(addr).await.is_ok());
    }
}
