use image::{ImageBuffer, Rgb};
use windows::Win32::Foundation::HWND;
use windows::Win32::Graphics::Gdi::{
    BitBlt, CreateCompatibleBitmap, CreateCompatibleDC, DeleteDC, DeleteObject, GetDC,
    GetDIBits, ReleaseDC, SelectObject, BITMAPINFO, BITMAPINFOHEADER, BI_RGB, DIB_RGB_COLORS,
    HBITMAP, HDC, SRCCOPY,
};

use crate::core::coords::PixelRect;
use crate::core::window::get_client_size;

/// GDI handles for one capture, released in reverse order on drop.
struct CaptureGuard {
    hwnd: HWND,
    hdc: HDC,
    mem_dc: HDC,
    bitmap: HBITMAP,
}

impl Drop for CaptureGuard {
    fn drop(&mut self) {
        unsafe {
            let _ = DeleteObject(self.bitmap);
            let _ = DeleteDC(self.mem_dc);
            let _ = ReleaseDC(self.hwnd, self.hdc);
        }
    }
}

/// Capture a client-area region into an RGB image buffer using BitBlt.
/// The window must be visible; occluded pixels come back as drawn on screen.
pub fn capture_client_region(
    hwnd: HWND,
    region: PixelRect,
) -> Result<ImageBuffer<Rgb<u8>, Vec<u8>>, String> {
    let (client_w, client_h) =
        get_client_size(hwnd).ok_or_else(|| "Failed to get client size".to_string())?;

    let (region_x, region_y, region_w, region_h) = region;
    if region_x < 0
        || region_y < 0
        || region_w <= 0
        || region_h <= 0
        || region_x + region_w > client_w
        || region_y + region_h > client_h
    {
        return Err(format!(
            "Region ({}, {}, {}x{}) is outside the {}x{} client area",
            region_x, region_y, region_w, region_h, client_w, client_h
        ));
    }

    unsafe {
        let hdc = GetDC(hwnd);
        if hdc.is_invalid() {
            return Err("Failed to get window device context".to_string());
        }

        let mem_dc = CreateCompatibleDC(hdc);
        if mem_dc.is_invalid() {
            let _ = ReleaseDC(hwnd, hdc);
            return Err("Failed to create compatible DC".to_string());
        }

        let bitmap = CreateCompatibleBitmap(hdc, region_w, region_h);
        if bitmap.is_invalid() {
            let _ = DeleteDC(mem_dc);
            let _ = ReleaseDC(hwnd, hdc);
            return Err("Failed to create compatible bitmap".to_string());
        }

        let guard = CaptureGuard {
            hwnd,
            hdc,
            mem_dc,
            bitmap,
        };

        let old_bitmap = SelectObject(guard.mem_dc, guard.bitmap);
        let blt = BitBlt(
            guard.mem_dc,
            0,
            0,
            region_w,
            region_h,
            guard.hdc,
            region_x,
            region_y,
            SRCCOPY,
        );
        // Deselect before reading the bits back
        SelectObject(guard.mem_dc, old_bitmap);
        if blt.is_err() {
            return Err("BitBlt failed - could not capture window".to_string());
        }

        // 32bpp top-down so rows have no stride padding
        let mut bmi = BITMAPINFO {
            bmiHeader: BITMAPINFOHEADER {
                biSize: std::mem::size_of::<BITMAPINFOHEADER>() as u32,
                biWidth: region_w,
                biHeight: -region_h,
                biPlanes: 1,
                biBitCount: 32,
                biCompression: BI_RGB.0 as u32,
                ..Default::default()
            },
            bmiColors: [Default::default(); 1],
        };

        let mut buffer = vec![0u8; (region_w * region_h * 4) as usize];
        let scan_lines = GetDIBits(
            guard.mem_dc,
            guard.bitmap,
            0,
            region_h as u32,
            Some(buffer.as_mut_ptr() as *mut _),
            &mut bmi,
            DIB_RGB_COLORS,
        );
        if scan_lines == 0 {
            return Err("Failed to read bitmap bits".to_string());
        }

        // Windows hands back BGRA
        let mut image = ImageBuffer::new(region_w as u32, region_h as u32);
        for y in 0..region_h {
            for x in 0..region_w {
                let idx = ((y * region_w + x) * 4) as usize;
                image.put_pixel(
                    x as u32,
                    y as u32,
                    Rgb([buffer[idx + 2], buffer[idx + 1], buffer[idx]]),
                );
            }
        }

        Ok(image)
    }
}
